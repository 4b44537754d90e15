use thiserror::Error;

/// Errors that can occur when reading required context state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("Office scope is required but was not set")]
    ScopeNotSet,
}

/// Result type for context operations.
pub type Result<T> = std::result::Result<T, ContextError>;
