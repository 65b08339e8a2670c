use super::error::ValidationError;
use super::types::Product;

/// Maximum number of characters allowed in a product name.
pub const MAX_NAME_LEN: usize = 200;

/// Validates that a product id is usable as a key.
pub fn validate_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::EmptyId);
    }
    Ok(())
}

/// Validates a product before creation or update.
pub fn validate_product(product: &Product) -> Result<(), ValidationError> {
    validate_id(&product.id)?;

    if product.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if product.name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong);
    }

    if !product.price.is_finite() {
        return Err(ValidationError::NonFinitePrice);
    }
    if product.price < 0.0 {
        return Err(ValidationError::NegativePrice(product.price));
    }

    Ok(())
}
