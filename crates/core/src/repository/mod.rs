mod base;
mod cached;
mod error;
mod traits;

pub use base::{EntityRepository, SearchHandler, SearchTable};
pub use cached::{CachePolicy, CachedRepository};
pub use error::{MappingError, RepositoryError, Result};
pub use traits::Repository;
