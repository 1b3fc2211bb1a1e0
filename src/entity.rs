//! Catalog entities and their row mappings.
//!
//! `Category` and `Product` mirror the `categories` / `products` tables
//! one-to-one. The product side of the one-to-many relationship is a plain
//! `category_id` foreign key; reverse navigation goes through
//! [`CatalogRepository::products_by_category`](crate::repository::CatalogRepository::products_by_category)
//! instead of an embedded back-reference.

use chrono::{DateTime, Utc};
use may_postgres::Row;
use rust_decimal::Decimal;

/// Trait for parsing an entity out of a database row.
///
/// Implementations read columns by name so the statement's column order does
/// not matter.
pub trait FromRow: Sized {
    /// Parse an entity from a `may_postgres` row.
    ///
    /// # Errors
    ///
    /// Returns the underlying `may_postgres::Error` if a column is missing or
    /// has an unexpected type.
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error>;
}

/// A product category.
///
/// `active = false` means soft-deleted: excluded from default listings, but
/// the row is retained and its products stay addressable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Stable identity, assigned on insert, immutable.
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

impl FromRow for Category {
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            active: row.try_get("active")?,
        })
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Stable identity, assigned on insert, immutable.
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Positive, currency precision (NUMERIC(18,2)).
    pub price: Decimal,
    /// References an existing category; the category was active at write
    /// time but may have been deactivated since.
    pub category_id: i32,
    /// Never negative.
    pub stock_quantity: i32,
    /// Set once at creation, immutable afterwards.
    pub created_date: DateTime<Utc>,
    /// Soft-delete flag.
    pub active: bool,
}

impl FromRow for Product {
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            category_id: row.try_get("category_id")?,
            stock_quantity: row.try_get("stock_quantity")?,
            created_date: row.try_get("created_date")?,
            active: row.try_get("active")?,
        })
    }
}

/// Field set for inserting a category.
///
/// The `active` flag is settable here so the seeder can create inactive demo
/// rows; the service layer always inserts with `active = true`.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

/// Field set for inserting a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i32,
    pub stock_quantity: i32,
    pub created_date: DateTime<Utc>,
    pub active: bool,
}
