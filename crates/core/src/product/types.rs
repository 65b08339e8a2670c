use serde::{Deserialize, Serialize};

/// A catalog product.
///
/// The `id` is the product's identity and never changes once the product
/// has been created. The remaining fields are mutable attributes. Nothing
/// here enforces validity; see [`validate_product`](super::validate_product).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Creates a new product with the given id, name and price.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            description: None,
        }
    }

    /// Sets the description for this product.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns a copy with a different price, keeping the identity.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Returns a copy with a different name, keeping the identity.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_has_no_description() {
        let product = Product::new("P1", "Widget", 9.99);

        assert_eq!(product.id, "P1");
        assert_eq!(product.name, "Widget");
        assert_eq!(product.price, 9.99);
        assert!(product.description.is_none());
    }

    #[test]
    fn test_builders_keep_identity() {
        let product = Product::new("P1", "Widget", 9.99)
            .with_name("Gadget")
            .with_price(12.5)
            .with_description("Shiny");

        assert_eq!(product.id, "P1");
        assert_eq!(product.name, "Gadget");
        assert_eq!(product.price, 12.5);
        assert_eq!(product.description.as_deref(), Some("Shiny"));
    }

    #[test]
    fn test_json_omits_missing_description() {
        let json = serde_json::to_value(Product::new("P1", "Widget", 1.0)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "id": "P1", "name": "Widget", "price": 1.0 })
        );
    }

    #[test]
    fn test_json_accepts_missing_description() {
        let product: Product =
            serde_json::from_str(r#"{"id":"P2","name":"Bolt","price":0.25}"#).unwrap();

        assert_eq!(product, Product::new("P2", "Bolt", 0.25));
    }
}
