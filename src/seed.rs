//! Demo catalog seeding.
//!
//! Inserts a small, recognizable data set for development databases:
//! five categories (one inactive) and fifteen products, including inactive
//! products and an active product inside the inactive category, so the
//! soft-delete edge cases are exercisable out of the box.
//!
//! Seeding goes through the repository directly rather than the service:
//! the service always writes `active = true`, and the demo set needs
//! inactive rows.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crate::entity::{NewCategory, NewProduct};
use crate::executor::DbError;
use crate::repository::CatalogRepository;

/// Seed the demo catalog into an empty database.
///
/// A no-op returning `false` when any category rows already exist; returns
/// `true` after inserting the demo set.
///
/// # Errors
///
/// Returns `DbError` if any insert fails.
pub fn seed_demo_catalog<R: CatalogRepository>(repository: &R) -> Result<bool, DbError> {
    if repository.count_categories()? > 0 {
        log::debug!("catalog already seeded, skipping");
        return Ok(false);
    }

    let electronics = repository.insert_category(category("Electronics", "Gadgets and devices", true))?;
    let home = repository.insert_category(category("Home", "Home essentials", true))?;
    let fitness = repository.insert_category(category("Fitness", "Fitness gear", true))?;
    let books = repository.insert_category(category("Books", "Books & media", true))?;
    let legacy = repository.insert_category(category("Legacy", "Inactive category", false))?;

    let now = Utc::now();

    // (name, description, price cents, category, stock, days old, active)
    let demo_products: [(&str, &str, i64, i32, i32, i64, bool); 15] = [
        ("Wireless Headphones", "Over-ear", 14999, electronics.id, 25, 10, true),
        ("USB-C Charger", "65W", 3999, electronics.id, 0, 7, true),
        ("Smart Light Bulb", "Color", 1999, electronics.id, 80, 20, true),
        ("Chef Knife", "8-inch", 5999, home.id, 12, 15, true),
        ("Cast Iron Skillet", "12-inch", 3499, home.id, 5, 30, true),
        ("Cutting block", "Wood", 5099, home.id, 10, 30, true),
        ("Yoga Mat", "Non-slip", 2999, fitness.id, 40, 5, true),
        ("Kettlebell 35lb", "Cast", 6999, fitness.id, 8, 2, true),
        ("Resistance Bands", "Set", 1499, fitness.id, 0, 1, true),
        ("Distributed Systems", "Textbook", 8900, books.id, 3, 60, true),
        ("Clean Architecture", "Patterns", 4200, books.id, 10, 45, true),
        ("Refactoring", "Patterns", 4000, books.id, 5, 45, true),
        // Inactive products for edge cases
        ("Old Model Router", "Legacy", 2499, electronics.id, 1, 365, false),
        ("Old Model Laptop", "Legacy", 10099, electronics.id, 1, 365, false),
        // Active product in the inactive category
        ("Discontinued Item", "Legacy", 999, legacy.id, 10, 200, true),
    ];

    for &(name, description, cents, category_id, stock_quantity, days_old, active) in
        &demo_products
    {
        repository.insert_product(NewProduct {
            name: name.to_string(),
            description: Some(description.to_string()),
            price: Decimal::new(cents, 2),
            category_id,
            stock_quantity,
            created_date: now - Duration::days(days_old),
            active,
        })?;
    }

    log::info!(
        "seeded demo catalog: 5 categories, {} products",
        demo_products.len()
    );
    Ok(true)
}

fn category(name: &str, description: &str, active: bool) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        description: Some(description.to_string()),
        active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryCatalogRepository;

    #[test]
    fn test_seed_populates_empty_repository() {
        let repo = MemoryCatalogRepository::new();
        assert!(seed_demo_catalog(&repo).expect("seed failed"));

        assert_eq!(repo.count_categories().unwrap(), 5);
        // Four categories are active; Legacy is not.
        assert_eq!(repo.active_categories().unwrap().len(), 4);
        // Two of the fifteen products are inactive.
        assert_eq!(repo.active_products().unwrap().len(), 13);
    }

    #[test]
    fn test_seed_is_idempotent() {
        let repo = MemoryCatalogRepository::new();
        assert!(seed_demo_catalog(&repo).expect("first seed failed"));
        assert!(!seed_demo_catalog(&repo).expect("second seed failed"));
        assert_eq!(repo.count_categories().unwrap(), 5);
    }
}
