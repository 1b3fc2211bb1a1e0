//! In-memory catalog repository.
//!
//! Backs unit and service tests, and small embedded setups, with the same
//! contract the PostgreSQL repository honors: name-ordered active listings,
//! unrestricted by-id lookups, per-entity atomic writes behind one lock.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::entity::{Category, NewCategory, NewProduct, Product};
use crate::executor::DbError;
use crate::repository::CatalogRepository;

#[derive(Debug, Default)]
struct Inner {
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, Product>,
    next_category_id: i32,
    next_product_id: i32,
}

/// Mutex-guarded in-memory repository.
#[derive(Debug, Default)]
pub struct MemoryCatalogRepository {
    inner: Mutex<Inner>,
}

impl MemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, DbError> {
        self.inner
            .lock()
            .map_err(|_| DbError::Other("repository lock poisoned".to_string()))
    }
}

impl CatalogRepository for MemoryCatalogRepository {
    fn active_categories(&self) -> Result<Vec<Category>, DbError> {
        let inner = self.lock()?;
        let mut rows: Vec<Category> = inner
            .categories
            .values()
            .filter(|c| c.active)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    fn category_by_id(&self, id: i32) -> Result<Option<Category>, DbError> {
        Ok(self.lock()?.categories.get(&id).cloned())
    }

    fn active_category_by_id(&self, id: i32) -> Result<Option<Category>, DbError> {
        Ok(self
            .lock()?
            .categories
            .get(&id)
            .filter(|c| c.active)
            .cloned())
    }

    fn insert_category(&self, fields: NewCategory) -> Result<Category, DbError> {
        let mut inner = self.lock()?;
        inner.next_category_id += 1;
        let category = Category {
            id: inner.next_category_id,
            name: fields.name,
            description: fields.description,
            active: fields.active,
        };
        inner.categories.insert(category.id, category.clone());
        Ok(category)
    }

    fn count_categories(&self) -> Result<i64, DbError> {
        Ok(self.lock()?.categories.len() as i64)
    }

    fn active_products(&self) -> Result<Vec<Product>, DbError> {
        let inner = self.lock()?;
        let mut rows: Vec<Product> = inner
            .products
            .values()
            .filter(|p| p.active)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    fn active_product_by_id(&self, id: i32) -> Result<Option<Product>, DbError> {
        Ok(self
            .lock()?
            .products
            .get(&id)
            .filter(|p| p.active)
            .cloned())
    }

    fn product_by_id(&self, id: i32) -> Result<Option<Product>, DbError> {
        Ok(self.lock()?.products.get(&id).cloned())
    }

    fn insert_product(&self, fields: NewProduct) -> Result<Product, DbError> {
        let mut inner = self.lock()?;
        inner.next_product_id += 1;
        let product = Product {
            id: inner.next_product_id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            category_id: fields.category_id,
            stock_quantity: fields.stock_quantity,
            created_date: fields.created_date,
            active: fields.active,
        };
        inner.products.insert(product.id, product.clone());
        Ok(product)
    }

    fn update_product(&self, product: &Product) -> Result<Product, DbError> {
        let mut inner = self.lock()?;
        let stored = inner
            .products
            .get_mut(&product.id)
            .ok_or_else(|| DbError::Query(format!("no product row with id {}", product.id)))?;

        // Full replace except identity and created_date.
        stored.name = product.name.clone();
        stored.description = product.description.clone();
        stored.price = product.price;
        stored.category_id = product.category_id;
        stored.stock_quantity = product.stock_quantity;
        stored.active = product.active;
        Ok(stored.clone())
    }

    fn set_product_active(&self, id: i32, active: bool) -> Result<bool, DbError> {
        let mut inner = self.lock()?;
        match inner.products.get_mut(&id) {
            Some(product) => {
                product.active = active;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn products_by_category(&self, category_id: i32) -> Result<Vec<Product>, DbError> {
        let inner = self.lock()?;
        let mut rows: Vec<Product> = inner
            .products
            .values()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn new_product(name: &str, category_id: i32, active: bool) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: None,
            price: Decimal::new(999, 2),
            category_id,
            stock_quantity: 10,
            created_date: Utc::now(),
            active,
        }
    }

    #[test]
    fn test_identity_assignment_is_sequential() {
        let repo = MemoryCatalogRepository::new();
        let first = repo
            .insert_category(NewCategory {
                name: "Electronics".to_string(),
                description: None,
                active: true,
            })
            .expect("insert failed");
        let second = repo
            .insert_category(NewCategory {
                name: "Home".to_string(),
                description: None,
                active: true,
            })
            .expect("insert failed");
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_active_listing_is_name_ordered_and_filtered() {
        let repo = MemoryCatalogRepository::new();
        repo.insert_product(new_product("Zed", 1, true)).unwrap();
        repo.insert_product(new_product("Alpha", 1, true)).unwrap();
        repo.insert_product(new_product("Mid", 1, false)).unwrap();

        let names: Vec<String> = repo
            .active_products()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Alpha", "Zed"]);
    }

    #[test]
    fn test_unrestricted_lookup_sees_inactive_rows() {
        let repo = MemoryCatalogRepository::new();
        let stored = repo.insert_product(new_product("Old Model Router", 1, false)).unwrap();

        assert!(repo.active_product_by_id(stored.id).unwrap().is_none());
        let row = repo.product_by_id(stored.id).unwrap().expect("row retained");
        assert!(!row.active);
    }

    #[test]
    fn test_products_by_category_includes_inactive() {
        let repo = MemoryCatalogRepository::new();
        repo.insert_product(new_product("A", 7, true)).unwrap();
        repo.insert_product(new_product("B", 7, false)).unwrap();
        repo.insert_product(new_product("C", 8, true)).unwrap();

        assert_eq!(repo.products_by_category(7).unwrap().len(), 2);
    }
}
