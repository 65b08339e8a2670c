mod error;
mod operations;
mod types;

pub use error::ValidationError;
pub use operations::{validate_id, validate_product, MAX_NAME_LEN};
pub use types::Product;
