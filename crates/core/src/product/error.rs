use thiserror::Error;

/// Reasons a product is rejected at the validation boundary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Product id cannot be empty")]
    EmptyId,
    #[error("Product name cannot be empty")]
    EmptyName,
    #[error("Product name too long (max 200 characters)")]
    NameTooLong,
    #[error("Product price cannot be negative: {0}")]
    NegativePrice(f64),
    #[error("Product price must be a finite number")]
    NonFinitePrice,
    #[error("Rejected by remote: {0}")]
    Rejected(String),
}
