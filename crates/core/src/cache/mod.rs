mod error;
mod keys;
mod layer;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{build_key, hash_tag};
pub use layer::CacheLayer;
pub use traits::Cache;
