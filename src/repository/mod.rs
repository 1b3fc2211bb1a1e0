//! Durable storage of categories and products.
//!
//! [`CatalogRepository`] is the only seam that touches persistent state. The
//! active-vs-all distinction is deliberately spelled out as separate methods
//! (`active_*` vs unrestricted lookups) rather than an implicit global
//! filter, so each call site shows which visibility it wants.

mod memory;
mod params;
mod postgres;

pub use memory::MemoryCatalogRepository;
pub use postgres::PgCatalogRepository;

use crate::entity::{Category, NewCategory, NewProduct, Product};
use crate::executor::DbError;

/// Storage contract consumed by the catalog service, the aggregator, and the
/// seeder.
///
/// Writes are atomic per entity. Nothing here spans entities in one
/// transaction: the service's read-validate-then-write sequences are
/// documented as unguarded against concurrent deactivation.
pub trait CatalogRepository {
    /// Active categories, ordered by name ascending.
    fn active_categories(&self) -> Result<Vec<Category>, DbError>;

    /// A category by id, regardless of its active flag.
    fn category_by_id(&self, id: i32) -> Result<Option<Category>, DbError>;

    /// A category by id only if it is active; `None` when missing or
    /// inactive. Used to validate a product's category reference at write
    /// time.
    fn active_category_by_id(&self, id: i32) -> Result<Option<Category>, DbError>;

    /// Persist a new category and return the stored row with its assigned
    /// identity.
    fn insert_category(&self, fields: NewCategory) -> Result<Category, DbError>;

    /// Total number of category rows, active or not.
    fn count_categories(&self) -> Result<i64, DbError>;

    /// Active products, ordered by name ascending.
    fn active_products(&self) -> Result<Vec<Product>, DbError>;

    /// An active product by id; `None` when missing or soft-deleted.
    fn active_product_by_id(&self, id: i32) -> Result<Option<Product>, DbError>;

    /// A product by id, regardless of its active flag.
    fn product_by_id(&self, id: i32) -> Result<Option<Product>, DbError>;

    /// Persist a new product and return the stored row with its assigned
    /// identity.
    fn insert_product(&self, fields: NewProduct) -> Result<Product, DbError>;

    /// Full replace of a product's mutable fields, keyed by `product.id`.
    /// `id` and `created_date` are never written.
    ///
    /// Returns the stored row.
    fn update_product(&self, product: &Product) -> Result<Product, DbError>;

    /// Set the soft-delete flag. Returns whether a row was affected.
    fn set_product_active(&self, id: i32, active: bool) -> Result<bool, DbError>;

    /// All products referencing the category, active and inactive, for the
    /// aggregator.
    fn products_by_category(&self, category_id: i32) -> Result<Vec<Product>, DbError>;
}
