//! Field-level validation for mutation requests.
//!
//! Pure functions over a candidate field set: no storage access, no side
//! effects. Every rule is evaluated, so a request carrying several bad
//! fields reports all of them at once, in rule order.
//!
//! Existence of a referenced category is deliberately out of scope here; the
//! service checks it against the repository.

use rust_decimal::Decimal;

use crate::dto::{CategoryCreateRequest, ProductCreateRequest, ProductUpdateRequest};

/// Outcome of validating one request.
///
/// An empty error list means the request is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The ordered violation messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    fn push(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

/// Validate a category create request.
pub fn validate_category_create(request: &CategoryCreateRequest) -> ValidationResult {
    let mut result = ValidationResult::new();

    if request.name.trim().is_empty() {
        result.push("Name is required.");
    }

    result
}

/// Validate a product create request.
pub fn validate_product_create(request: &ProductCreateRequest) -> ValidationResult {
    validate_product_fields(
        &request.name,
        request.price,
        request.stock_quantity,
        request.category_id,
    )
}

/// Validate a product update request. Same rules as create.
pub fn validate_product_update(request: &ProductUpdateRequest) -> ValidationResult {
    validate_product_fields(
        &request.name,
        request.price,
        request.stock_quantity,
        request.category_id,
    )
}

fn validate_product_fields(
    name: &str,
    price: Decimal,
    stock_quantity: i32,
    category_id: i32,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    if name.trim().is_empty() {
        result.push("Name is required.");
    }

    if price <= Decimal::ZERO {
        result.push("Price must be greater than 0.");
    }

    if stock_quantity < 0 {
        result.push("StockQuantity cannot be negative.");
    }

    // Structural sanity check only; existence is the service's job.
    if category_id <= 0 {
        result.push("CategoryId must be a valid id.");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_request(
        name: &str,
        price: Decimal,
        category_id: i32,
        stock_quantity: i32,
    ) -> ProductCreateRequest {
        ProductCreateRequest {
            name: name.to_string(),
            description: None,
            price,
            category_id,
            stock_quantity,
        }
    }

    #[test]
    fn test_valid_product_passes() {
        let request = product_request("Yoga Mat", Decimal::new(2999, 2), 1, 40);
        assert!(validate_product_create(&request).is_valid());
    }

    #[test]
    fn test_blank_name_is_rejected_after_trimming() {
        let request = product_request("   ", Decimal::new(100, 2), 1, 1);
        let result = validate_product_create(&request);
        assert_eq!(result.errors(), ["Name is required."]);
    }

    #[test]
    fn test_zero_and_negative_price_rejected() {
        for price in [Decimal::ZERO, Decimal::new(-100, 2)] {
            let request = product_request("Kettlebell 35lb", price, 1, 8);
            let result = validate_product_create(&request);
            assert_eq!(result.errors(), ["Price must be greater than 0."]);
        }
    }

    #[test]
    fn test_negative_stock_rejected() {
        let request = product_request("Chef Knife", Decimal::new(5999, 2), 1, -1);
        let result = validate_product_create(&request);
        assert_eq!(result.errors(), ["StockQuantity cannot be negative."]);
    }

    #[test]
    fn test_nonpositive_category_id_rejected() {
        for category_id in [0, -4] {
            let request = product_request("Chef Knife", Decimal::new(5999, 2), category_id, 1);
            let result = validate_product_create(&request);
            assert_eq!(result.errors(), ["CategoryId must be a valid id."]);
        }
    }

    #[test]
    fn test_all_violations_reported_together_in_rule_order() {
        let request = product_request("", Decimal::ZERO, 0, -3);
        let result = validate_product_create(&request);
        assert_eq!(
            result.errors(),
            [
                "Name is required.",
                "Price must be greater than 0.",
                "StockQuantity cannot be negative.",
                "CategoryId must be a valid id.",
            ]
        );
    }

    #[test]
    fn test_update_rules_match_create() {
        let request = ProductUpdateRequest {
            name: String::new(),
            description: None,
            price: Decimal::new(-1, 0),
            category_id: -1,
            stock_quantity: -1,
        };
        let result = validate_product_update(&request);
        assert_eq!(result.errors().len(), 4);
    }

    #[test]
    fn test_category_name_required() {
        let request = CategoryCreateRequest {
            name: "  ".to_string(),
            description: Some("Gadgets and devices".to_string()),
        };
        let result = validate_category_create(&request);
        assert_eq!(result.errors(), ["Name is required."]);
        assert!(!result.is_valid());
    }
}
