mod error;
mod traits;
mod types;

pub use error::{ClientError, Result};
pub use traits::UpstreamClient;
pub use types::{AttrValue, SearchCriteria};
