use thiserror::Error;

use crate::client::ClientError;
use crate::context::ContextError;
use crate::entity::EntityId;
use crate::relation::RelationError;

/// Errors that can occur while mapping an upstream record into a model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("Invalid field on {entity}: {field}: {reason}")]
    InvalidField {
        entity: &'static str,
        field: &'static str,
        reason: String,
    },
}

/// Errors that can occur during repository operations.
///
/// `NotFound` is a legitimate business outcome the caller must handle;
/// everything else is a programmer or configuration error. Nothing is
/// retried at this layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: EntityId },
    #[error("Unsupported search attribute on {entity}: {attribute}")]
    UnsupportedSearchAttribute {
        entity: &'static str,
        attribute: String,
    },
    #[error(transparent)]
    Relation(#[from] RelationError),
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
