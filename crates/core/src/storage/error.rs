use std::fmt;

use thiserror::Error;

use crate::product::ValidationError;

/// What kind of I/O failure a [`TransportError`] wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The request did not complete in time.
    Timeout,
    /// The connection could not be established or was dropped.
    Connection,
    /// The remote answered with an unexpected non-2xx status.
    Status(u16),
    /// The response body could not be decoded.
    Decode,
    /// A local storage engine failed.
    Storage,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportErrorKind::Timeout => write!(f, "timeout"),
            TransportErrorKind::Connection => write!(f, "connection"),
            TransportErrorKind::Status(code) => write!(f, "status {code}"),
            TransportErrorKind::Decode => write!(f, "decode"),
            TransportErrorKind::Storage => write!(f, "storage"),
        }
    }
}

/// An I/O failure underneath a repository, flattened to a comparable value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Connection, message)
    }

    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Status(code), message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Decode, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Storage, message)
    }
}

/// Errors that can occur during repository operations.
///
/// This is the whole taxonomy a caller of any pipeline layer can observe.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    Conflict {
        entity_type: &'static str,
        id: String,
    },
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl RepositoryError {
    /// Shorthand for a product `NotFound`.
    pub fn product_not_found(id: impl Into<String>) -> Self {
        RepositoryError::NotFound {
            entity_type: "Product",
            id: id.into(),
        }
    }

    /// Shorthand for a product `Conflict`.
    pub fn product_conflict(id: impl Into<String>) -> Self {
        RepositoryError::Conflict {
            entity_type: "Product",
            id: id.into(),
        }
    }

    /// Returns true if retrying the same call could succeed.
    ///
    /// Only transport failures qualify; not-found, conflict and validation
    /// outcomes are answers, not faults.
    pub fn is_transient(&self) -> bool {
        matches!(self, RepositoryError::Transport(_))
    }

    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RepositoryError::NotFound { .. } => "not_found",
            RepositoryError::Conflict { .. } => "conflict",
            RepositoryError::Validation(_) => "validation",
            RepositoryError::Transport(_) => "transport",
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::product_not_found("abc-123");
        assert_eq!(error.to_string(), "Product not found: abc-123");
    }

    #[test]
    fn test_repository_error_conflict_display() {
        let error = RepositoryError::product_conflict("P1");
        assert_eq!(error.to_string(), "Product already exists: P1");
    }

    #[test]
    fn test_repository_error_validation_display() {
        let error = RepositoryError::from(ValidationError::EmptyName);
        assert_eq!(
            error.to_string(),
            "Validation failed: Product name cannot be empty"
        );
    }

    #[test]
    fn test_repository_error_transport_display() {
        let error = RepositoryError::from(TransportError::timeout("after 5s"));
        assert_eq!(error.to_string(), "Transport error: timeout: after 5s");

        let error = RepositoryError::from(TransportError::status(502, "bad gateway"));
        assert_eq!(error.to_string(), "Transport error: status 502: bad gateway");
    }

    #[test]
    fn test_only_transport_is_transient() {
        assert!(RepositoryError::from(TransportError::connection("reset")).is_transient());
        assert!(!RepositoryError::product_not_found("P1").is_transient());
        assert!(!RepositoryError::product_conflict("P1").is_transient());
        assert!(!RepositoryError::from(ValidationError::EmptyId).is_transient());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(RepositoryError::product_not_found("P1").kind(), "not_found");
        assert_eq!(RepositoryError::product_conflict("P1").kind(), "conflict");
        assert_eq!(
            RepositoryError::from(ValidationError::EmptyId).kind(),
            "validation"
        );
        assert_eq!(
            RepositoryError::from(TransportError::decode("bad json")).kind(),
            "transport"
        );
    }
}
