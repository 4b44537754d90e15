use thiserror::Error;

/// Errors that can occur when declaring or resolving relations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelationError {
    #[error("Invalid relation path: {0}")]
    InvalidPath(String),
    #[error("Relation not declared on {entity}: {relation}")]
    NotDeclared {
        entity: &'static str,
        relation: String,
    },
    #[error("Relation already declared on {entity}: {relation}")]
    AlreadyDeclared {
        entity: &'static str,
        relation: &'static str,
    },
}

/// Result type for relation declaration and resolution.
pub type Result<T> = std::result::Result<T, RelationError>;
