use thiserror::Error;

/// Errors surfaced by concrete upstream clients.
///
/// The repository layer passes these through unmodified: it adds no retry
/// or timeout policy of its own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Transport failed: {0}")]
    Transport(String),
    #[error("Decode failed: {0}")]
    Decode(String),
}

/// Result type for upstream client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_display() {
        let error = ClientError::Transport("connection reset".to_string());
        assert_eq!(error.to_string(), "Transport failed: connection reset");
    }

    #[test]
    fn test_decode_display() {
        let error = ClientError::Decode("unexpected payload shape".to_string());
        assert_eq!(error.to_string(), "Decode failed: unexpected payload shape");
    }
}
