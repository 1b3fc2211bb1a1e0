//! Request and response value shapes.
//!
//! These are the transport-agnostic shapes a caller exchanges with
//! [`CatalogService`](crate::service::CatalogService). They serialize to the
//! camelCase JSON the storefront API exposes one-to-one.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entity::{Category, Product};

/// Fields for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreateRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Fields for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreateRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i32,
    pub stock_quantity: i32,
}

/// Fields for a full-replace product update. Same body as create; the target
/// id travels separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdateRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i32,
    pub stock_quantity: i32,
}

/// A category as returned by list/create operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl CategoryResponse {
    pub fn from_entity(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            description: category.description.clone(),
        }
    }
}

/// A product joined with its category's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub created_date: DateTime<Utc>,
    pub category_id: i32,
    pub category_name: String,
}

impl ProductResponse {
    pub fn from_entity(product: Product, category_name: String) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock_quantity: product.stock_quantity,
            created_date: product.created_date,
            category_id: product.category_id,
            category_name,
        }
    }
}

/// The derived per-category statistics view.
///
/// Every price/stock aggregate defaults to zero (not null, not absent) when
/// the category has no active products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category_id: i32,
    pub category_name: String,
    pub total_products: i64,
    pub active_products: i64,
    pub out_of_stock_count: i64,
    pub average_price: Decimal,
    pub total_inventory_value: Decimal,
    pub min_price: Decimal,
    pub max_price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_response_serializes_camel_case() {
        let response = ProductResponse {
            id: 7,
            name: "Yoga Mat".to_string(),
            description: Some("Non-slip".to_string()),
            price: Decimal::new(2999, 2),
            stock_quantity: 40,
            created_date: Utc::now(),
            category_id: 3,
            category_name: "Fitness".to_string(),
        };

        let json = serde_json::to_value(&response).expect("serialization failed");
        let object = json.as_object().expect("expected object");
        for key in [
            "id",
            "name",
            "description",
            "price",
            "stockQuantity",
            "createdDate",
            "categoryId",
            "categoryName",
        ] {
            assert!(object.contains_key(key), "missing key: {}", key);
        }
    }

    #[test]
    fn test_create_request_description_defaults_to_none() {
        let request: ProductCreateRequest = serde_json::from_str(
            r#"{"name":"USB-C Charger","price":"39.99","categoryId":1,"stockQuantity":0}"#,
        )
        .expect("deserialization failed");
        assert_eq!(request.description, None);
        assert_eq!(request.category_id, 1);
    }

    #[test]
    fn test_summary_serializes_all_aggregate_fields() {
        let summary = CategorySummary {
            category_id: 1,
            category_name: "Books".to_string(),
            total_products: 0,
            active_products: 0,
            out_of_stock_count: 0,
            average_price: Decimal::ZERO,
            total_inventory_value: Decimal::ZERO,
            min_price: Decimal::ZERO,
            max_price: Decimal::ZERO,
        };

        let json = serde_json::to_value(&summary).expect("serialization failed");
        let object = json.as_object().expect("expected object");
        for key in [
            "categoryId",
            "categoryName",
            "totalProducts",
            "activeProducts",
            "outOfStockCount",
            "averagePrice",
            "totalInventoryValue",
            "minPrice",
            "maxPrice",
        ] {
            assert!(object.contains_key(key), "missing key: {}", key);
        }
    }
}
