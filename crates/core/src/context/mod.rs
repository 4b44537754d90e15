mod error;
mod types;

pub use error::{ContextError, Result};
pub use types::{Context, Pagination};
