mod error;
mod loadable;
mod loaders;
mod path;

pub use error::{RelationError, Result};
pub use loadable::Loadable;
pub use loaders::{RelationLoader, RelationSet, ToMany, ToOne};
pub use path::RelationPath;
