//! Schema migrations for the catalog database.
//!
//! This module provides:
//! - the [`Migration`] trait (versioned statement lists)
//! - [`SchemaManager`] for applying a migration's statements
//! - [`Migrator`] for state tracking, ordered application, checksum
//!   validation, and rollback
//!
//! Applied migrations are recorded in the `catalog_migrations` table
//! together with a SHA-256 checksum of their statements, so a drifted
//! migration is caught instead of silently diverging from the database.

mod catalog_schema;
mod migration;
mod migrator;
mod schema_manager;

pub use catalog_schema::CreateCatalogSchema;
pub use migration::Migration;
pub use migrator::{MigrationError, MigrationStatus, Migrator};
pub use schema_manager::SchemaManager;

/// Every migration this crate ships, in no particular order; the
/// [`Migrator`] sorts by version.
pub fn catalog_migrations() -> Vec<Box<dyn Migration>> {
    vec![Box::new(CreateCatalogSchema)]
}
