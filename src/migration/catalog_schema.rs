//! Migration: create the catalog schema.
//!
//! Creates the `categories` and `products` tables with the soft-delete
//! flags, the product→category foreign key, and the indexes backing the
//! active-only listings and per-category product lookups.

use crate::migration::Migration;

pub struct CreateCatalogSchema;

impl Migration for CreateCatalogSchema {
    fn name(&self) -> &str {
        "create_catalog_schema"
    }

    fn version(&self) -> i64 {
        20250301120000
    }

    fn up(&self) -> Vec<String> {
        vec![
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                id SERIAL PRIMARY KEY,
                name VARCHAR(200) NOT NULL,
                description VARCHAR(2000),
                active BOOLEAN NOT NULL DEFAULT true
            )
            "#
            .to_string(),
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id SERIAL PRIMARY KEY,
                name VARCHAR(200) NOT NULL,
                description VARCHAR(2000),
                price NUMERIC(18,2) NOT NULL,
                category_id INTEGER NOT NULL REFERENCES categories(id),
                stock_quantity INTEGER NOT NULL,
                created_date TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                active BOOLEAN NOT NULL DEFAULT true
            )
            "#
            .to_string(),
            "CREATE INDEX IF NOT EXISTS idx_categories_active ON categories(active)".to_string(),
            "CREATE INDEX IF NOT EXISTS idx_products_active ON products(active)".to_string(),
            "CREATE INDEX IF NOT EXISTS idx_products_category_id_active ON products(category_id, active)"
                .to_string(),
        ]
    }

    fn down(&self) -> Vec<String> {
        vec![
            "DROP INDEX IF EXISTS idx_products_category_id_active".to_string(),
            "DROP INDEX IF EXISTS idx_products_active".to_string(),
            "DROP INDEX IF EXISTS idx_categories_active".to_string(),
            "DROP TABLE IF EXISTS products".to_string(),
            "DROP TABLE IF EXISTS categories".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up_creates_both_tables_and_indexes() {
        let statements = CreateCatalogSchema.up();
        assert_eq!(statements.len(), 5);
        assert!(statements[0].contains("categories"));
        assert!(statements[1].contains("REFERENCES categories(id)"));
        assert!(statements[4].contains("category_id, active"));
    }

    #[test]
    fn test_down_drops_products_before_categories() {
        let statements = CreateCatalogSchema.down();
        let products_pos = statements
            .iter()
            .position(|s| s.contains("DROP TABLE IF EXISTS products"))
            .expect("products drop missing");
        let categories_pos = statements
            .iter()
            .position(|s| s.contains("DROP TABLE IF EXISTS categories"))
            .expect("categories drop missing");
        assert!(products_pos < categories_pos);
    }
}
