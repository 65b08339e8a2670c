mod error;
mod http_mapping;
mod traits;

pub use error::{RepositoryError, Result, TransportError, TransportErrorKind};
pub use http_mapping::{repository_error_to_status_code, status_code_to_repository_error};
pub use traits::{Connectivity, LocalStore, Operation, ProductRepository};
