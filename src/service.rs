//! Catalog service orchestration.
//!
//! Validates requests, enforces the cross-entity invariant (a product's
//! category must exist and be active at write time), drives the repository,
//! and assembles the joined response values. Holds no state beyond the
//! repository reference; operations are independent request/response units.

use std::collections::HashMap;

use chrono::Utc;

use crate::dto::{
    CategoryCreateRequest, CategoryResponse, CategorySummary, ProductCreateRequest,
    ProductResponse, ProductUpdateRequest,
};
use crate::entity::{Category, NewCategory, NewProduct};
use crate::error::CatalogError;
use crate::executor::DbError;
use crate::repository::CatalogRepository;
use crate::summary;
use crate::validation;

pub struct CatalogService<R: CatalogRepository> {
    repository: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Get a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// `Validation` with the full violation list on invalid input.
    pub fn create_category(
        &self,
        request: &CategoryCreateRequest,
    ) -> Result<CategoryResponse, CatalogError> {
        let validation = validation::validate_category_create(request);
        if !validation.is_valid() {
            return Err(CatalogError::Validation(validation.into_errors()));
        }

        let stored = self.repository.insert_category(NewCategory {
            name: request.name.trim().to_string(),
            description: trimmed(request.description.as_deref()),
            active: true,
        })?;

        Ok(CategoryResponse::from_entity(&stored))
    }

    /// Active categories, ordered by name ascending.
    pub fn list_categories(&self) -> Result<Vec<CategoryResponse>, CatalogError> {
        let categories = self.repository.active_categories()?;
        Ok(categories.iter().map(CategoryResponse::from_entity).collect())
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// `Validation` on invalid fields; `CategoryNotActive` when the
    /// referenced category is missing or inactive (nothing is persisted).
    pub fn create_product(
        &self,
        request: &ProductCreateRequest,
    ) -> Result<ProductResponse, CatalogError> {
        let validation = validation::validate_product_create(request);
        if !validation.is_valid() {
            return Err(CatalogError::Validation(validation.into_errors()));
        }

        let category = self
            .repository
            .active_category_by_id(request.category_id)?
            .ok_or(CatalogError::CategoryNotActive)?;

        let stored = self.repository.insert_product(NewProduct {
            name: request.name.trim().to_string(),
            description: trimmed(request.description.as_deref()),
            price: request.price,
            category_id: category.id,
            stock_quantity: request.stock_quantity,
            created_date: Utc::now(),
            active: true,
        })?;

        Ok(ProductResponse::from_entity(stored, category.name))
    }

    /// An active product joined with its category name.
    ///
    /// # Errors
    ///
    /// `NotFound` when no active product has the id.
    pub fn get_product(&self, id: i32) -> Result<ProductResponse, CatalogError> {
        let product = self
            .repository
            .active_product_by_id(id)?
            .ok_or(CatalogError::NotFound)?;
        let category_name = self.category_name(product.category_id)?;
        Ok(ProductResponse::from_entity(product, category_name))
    }

    /// Active products ordered by name, each joined with its category name.
    pub fn list_products(&self) -> Result<Vec<ProductResponse>, CatalogError> {
        let products = self.repository.active_products()?;

        let mut names: HashMap<i32, String> = HashMap::new();
        let mut responses = Vec::with_capacity(products.len());
        for product in products {
            let category_name = match names.get(&product.category_id) {
                Some(name) => name.clone(),
                None => {
                    let name = self.category_name(product.category_id)?;
                    names.insert(product.category_id, name.clone());
                    name
                }
            };
            responses.push(ProductResponse::from_entity(product, category_name));
        }
        Ok(responses)
    }

    /// Full-field replace of an active product. `id` and `created_date` are
    /// never touched.
    ///
    /// # Errors
    ///
    /// `Validation` on invalid fields; `NotFound` when no active product has
    /// the id; `CategoryNotActive` when the new category reference is
    /// missing or inactive.
    pub fn update_product(
        &self,
        id: i32,
        request: &ProductUpdateRequest,
    ) -> Result<ProductResponse, CatalogError> {
        let validation = validation::validate_product_update(request);
        if !validation.is_valid() {
            return Err(CatalogError::Validation(validation.into_errors()));
        }

        let mut product = self
            .repository
            .active_product_by_id(id)?
            .ok_or(CatalogError::NotFound)?;

        let category = self
            .repository
            .active_category_by_id(request.category_id)?
            .ok_or(CatalogError::CategoryNotActive)?;

        product.name = request.name.trim().to_string();
        product.description = trimmed(request.description.as_deref());
        product.price = request.price;
        product.category_id = category.id;
        product.stock_quantity = request.stock_quantity;

        let stored = self.repository.update_product(&product)?;
        Ok(ProductResponse::from_entity(stored, category.name))
    }

    /// Soft-delete a product.
    ///
    /// # Errors
    ///
    /// `NotFound` when no active product has the id. Deactivating an
    /// already-inactive product therefore errors; flagged for product-owner
    /// confirmation before this ever changes.
    pub fn deactivate_product(&self, id: i32) -> Result<(), CatalogError> {
        let product = self
            .repository
            .active_product_by_id(id)?
            .ok_or(CatalogError::NotFound)?;
        self.repository.set_product_active(product.id, false)?;
        Ok(())
    }

    /// The summary view for a category, computed over all of its products
    /// (active and inactive). Inactive categories are summarized too.
    ///
    /// # Errors
    ///
    /// `NotFound` when no category row has the id.
    pub fn category_summary(&self, category_id: i32) -> Result<CategorySummary, CatalogError> {
        let category = self
            .repository
            .category_by_id(category_id)?
            .ok_or(CatalogError::NotFound)?;
        let products = self.repository.products_by_category(category.id)?;
        Ok(summary::summarize(&category, &products))
    }

    fn category_name(&self, category_id: i32) -> Result<String, CatalogError> {
        // Referential integrity guarantees the row; a miss is storage
        // corruption, not a caller error.
        let category: Category = self
            .repository
            .category_by_id(category_id)?
            .ok_or_else(|| {
                CatalogError::Store(DbError::Other(format!(
                    "product references missing category {category_id}"
                )))
            })?;
        Ok(category.name)
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}
