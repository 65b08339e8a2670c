//! Pure functions mapping between repository errors and HTTP status codes.
//!
//! The remote source uses [`status_code_to_repository_error`] to turn a
//! non-2xx response into the error taxonomy. The reverse mapping is what a
//! server exposing a pipeline would answer with.

use crate::product::ValidationError;

use super::{RepositoryError, TransportError};

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `Conflict` -> 409 (Conflict)
/// - `Validation` -> 422 (Unprocessable Entity)
/// - `Transport` with an upstream status -> that status
/// - any other `Transport` -> 503 (Service Unavailable)
///
/// # Examples
///
/// ```
/// use catalog_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::product_not_found("P1");
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    use super::TransportErrorKind;

    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::Conflict { .. } => 409,
        RepositoryError::Validation(_) => 422,
        RepositoryError::Transport(TransportError {
            kind: TransportErrorKind::Status(code),
            ..
        }) => *code,
        RepositoryError::Transport(_) => 503,
    }
}

/// Maps a non-2xx HTTP status returned by a remote source to a [`RepositoryError`].
///
/// 404 and 409 become the semantic variants for `id`; 400 and 422 become a
/// validation failure (the remote rejected the payload); everything else is
/// a transport failure carrying the status and response body.
pub fn status_code_to_repository_error(
    status: u16,
    entity_type: &'static str,
    id: &str,
    body: &str,
) -> RepositoryError {
    match status {
        404 => RepositoryError::NotFound {
            entity_type,
            id: id.to_string(),
        },
        409 => RepositoryError::Conflict {
            entity_type,
            id: id.to_string(),
        },
        400 | 422 => RepositoryError::Validation(ValidationError::Rejected(body.to_string())),
        _ => RepositoryError::Transport(TransportError::status(status, body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = RepositoryError::product_not_found("P1");
        assert_eq!(repository_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let error = RepositoryError::product_conflict("P1");
        assert_eq!(repository_error_to_status_code(&error), 409);
    }

    #[test]
    fn test_validation_maps_to_422() {
        let error = RepositoryError::Validation(ValidationError::EmptyName);
        assert_eq!(repository_error_to_status_code(&error), 422);
    }

    #[test]
    fn test_upstream_status_is_preserved() {
        let error = RepositoryError::Transport(TransportError::status(502, "bad gateway"));
        assert_eq!(repository_error_to_status_code(&error), 502);
    }

    #[test]
    fn test_other_transport_maps_to_503() {
        let error = RepositoryError::Transport(TransportError::timeout("slow"));
        assert_eq!(repository_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_404_becomes_not_found() {
        assert_eq!(
            status_code_to_repository_error(404, "Product", "P1", ""),
            RepositoryError::product_not_found("P1")
        );
    }

    #[test]
    fn test_409_becomes_conflict() {
        assert_eq!(
            status_code_to_repository_error(409, "Product", "P1", "duplicate"),
            RepositoryError::product_conflict("P1")
        );
    }

    #[test]
    fn test_422_becomes_validation() {
        let error = status_code_to_repository_error(422, "Product", "P1", "name is required");
        assert_eq!(
            error,
            RepositoryError::Validation(ValidationError::Rejected("name is required".to_string()))
        );
        assert!(!error.is_transient());
    }

    #[test]
    fn test_500_becomes_transient_transport() {
        let error = status_code_to_repository_error(500, "Product", "P1", "boom");
        assert_eq!(
            error,
            RepositoryError::Transport(TransportError::status(500, "boom"))
        );
        assert!(error.is_transient());
    }
}
