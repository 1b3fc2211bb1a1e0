//! PostgreSQL-backed catalog repository.
//!
//! Read statements are built with sea-query and executed through
//! [`PgExecutor`]; writes are prepared statements with `RETURNING` so the
//! stored row (with its assigned identity and defaults) comes back in the
//! same round trip.

use sea_query::{Asterisk, Expr, ExprTrait, Iden, Order, PostgresQueryBuilder, SelectStatement};

use crate::entity::{Category, FromRow, NewCategory, NewProduct, Product};
use crate::executor::{DbError, PgExecutor};
use crate::repository::params::with_bound_params;
use crate::repository::CatalogRepository;

enum Categories {
    Table,
    Id,
    Name,
    Active,
}

impl Iden for Categories {
    fn unquoted(&self) -> &str {
        match self {
            Categories::Table => "categories",
            Categories::Id => "id",
            Categories::Name => "name",
            Categories::Active => "active",
        }
    }
}

enum Products {
    Table,
    Id,
    Name,
    CategoryId,
    Active,
}

impl Iden for Products {
    fn unquoted(&self) -> &str {
        match self {
            Products::Table => "products",
            Products::Id => "id",
            Products::Name => "name",
            Products::CategoryId => "category_id",
            Products::Active => "active",
        }
    }
}

const INSERT_CATEGORY_SQL: &str = "INSERT INTO categories (name, description, active) \
     VALUES ($1, $2, $3) \
     RETURNING id, name, description, active";

const COUNT_CATEGORIES_SQL: &str = "SELECT COUNT(*) FROM categories";

const INSERT_PRODUCT_SQL: &str = "INSERT INTO products \
     (name, description, price, category_id, stock_quantity, created_date, active) \
     VALUES ($1, $2, $3, $4, $5, $6, $7) \
     RETURNING id, name, description, price, category_id, stock_quantity, created_date, active";

const UPDATE_PRODUCT_SQL: &str = "UPDATE products \
     SET name = $1, description = $2, price = $3, category_id = $4, stock_quantity = $5 \
     WHERE id = $6 \
     RETURNING id, name, description, price, category_id, stock_quantity, created_date, active";

const SET_PRODUCT_ACTIVE_SQL: &str = "UPDATE products SET active = $1 WHERE id = $2";

/// Catalog repository over a live PostgreSQL connection.
pub struct PgCatalogRepository<E: PgExecutor> {
    executor: E,
}

impl<E: PgExecutor> PgCatalogRepository<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Get a reference to the underlying executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    fn fetch_all<T: FromRow>(&self, stmt: SelectStatement) -> Result<Vec<T>, DbError> {
        let (sql, values) = stmt.build(PostgresQueryBuilder);
        log::debug!("query: {sql}");

        with_bound_params(&values, |params| {
            let rows = self.executor.query_all(&sql, params)?;
            let mut results = Vec::with_capacity(rows.len());
            for row in rows {
                results.push(
                    T::from_row(&row)
                        .map_err(|e| DbError::Parse(format!("Failed to parse row: {e}")))?,
                );
            }
            Ok(results)
        })
    }

    fn fetch_opt<T: FromRow>(&self, stmt: SelectStatement) -> Result<Option<T>, DbError> {
        let (sql, values) = stmt.build(PostgresQueryBuilder);
        log::debug!("query: {sql}");

        with_bound_params(&values, |params| {
            match self.executor.query_opt(&sql, params)? {
                Some(row) => Ok(Some(T::from_row(&row).map_err(|e| {
                    DbError::Parse(format!("Failed to parse row: {e}"))
                })?)),
                None => Ok(None),
            }
        })
    }

    fn parse_row<T: FromRow>(row: &may_postgres::Row) -> Result<T, DbError> {
        T::from_row(row).map_err(|e| DbError::Parse(format!("Failed to parse row: {e}")))
    }
}

fn select_categories() -> SelectStatement {
    let mut stmt = SelectStatement::default();
    stmt.column(Asterisk).from(Categories::Table);
    stmt
}

fn select_products() -> SelectStatement {
    let mut stmt = SelectStatement::default();
    stmt.column(Asterisk).from(Products::Table);
    stmt
}

impl<E: PgExecutor> CatalogRepository for PgCatalogRepository<E> {
    fn active_categories(&self) -> Result<Vec<Category>, DbError> {
        let mut stmt = select_categories();
        stmt.and_where(Expr::col(Categories::Active).eq(true))
            .order_by(Categories::Name, Order::Asc);
        self.fetch_all(stmt)
    }

    fn category_by_id(&self, id: i32) -> Result<Option<Category>, DbError> {
        let mut stmt = select_categories();
        stmt.and_where(Expr::col(Categories::Id).eq(id));
        self.fetch_opt(stmt)
    }

    fn active_category_by_id(&self, id: i32) -> Result<Option<Category>, DbError> {
        let mut stmt = select_categories();
        stmt.and_where(Expr::col(Categories::Id).eq(id))
            .and_where(Expr::col(Categories::Active).eq(true));
        self.fetch_opt(stmt)
    }

    fn insert_category(&self, fields: NewCategory) -> Result<Category, DbError> {
        log::debug!("inserting category: {}", fields.name);
        let row = self.executor.query_one(
            INSERT_CATEGORY_SQL,
            &[&fields.name, &fields.description, &fields.active],
        )?;
        Self::parse_row(&row)
    }

    fn count_categories(&self) -> Result<i64, DbError> {
        let row = self.executor.query_one(COUNT_CATEGORIES_SQL, &[])?;
        row.try_get(0)
            .map_err(|e| DbError::Parse(format!("Failed to parse count: {e}")))
    }

    fn active_products(&self) -> Result<Vec<Product>, DbError> {
        let mut stmt = select_products();
        stmt.and_where(Expr::col(Products::Active).eq(true))
            .order_by(Products::Name, Order::Asc);
        self.fetch_all(stmt)
    }

    fn active_product_by_id(&self, id: i32) -> Result<Option<Product>, DbError> {
        let mut stmt = select_products();
        stmt.and_where(Expr::col(Products::Id).eq(id))
            .and_where(Expr::col(Products::Active).eq(true));
        self.fetch_opt(stmt)
    }

    fn product_by_id(&self, id: i32) -> Result<Option<Product>, DbError> {
        let mut stmt = select_products();
        stmt.and_where(Expr::col(Products::Id).eq(id));
        self.fetch_opt(stmt)
    }

    fn insert_product(&self, fields: NewProduct) -> Result<Product, DbError> {
        log::debug!("inserting product: {}", fields.name);
        let row = self.executor.query_one(
            INSERT_PRODUCT_SQL,
            &[
                &fields.name,
                &fields.description,
                &fields.price,
                &fields.category_id,
                &fields.stock_quantity,
                &fields.created_date,
                &fields.active,
            ],
        )?;
        Self::parse_row(&row)
    }

    fn update_product(&self, product: &Product) -> Result<Product, DbError> {
        log::debug!("updating product {}", product.id);
        let row = self.executor.query_one(
            UPDATE_PRODUCT_SQL,
            &[
                &product.name,
                &product.description,
                &product.price,
                &product.category_id,
                &product.stock_quantity,
                &product.id,
            ],
        )?;
        Self::parse_row(&row)
    }

    fn set_product_active(&self, id: i32, active: bool) -> Result<bool, DbError> {
        let affected = self
            .executor
            .execute(SET_PRODUCT_ACTIVE_SQL, &[&active, &id])?;
        Ok(affected > 0)
    }

    fn products_by_category(&self, category_id: i32) -> Result<Vec<Product>, DbError> {
        let mut stmt = select_products();
        stmt.and_where(Expr::col(Products::CategoryId).eq(category_id))
            .order_by(Products::Name, Order::Asc);
        self.fetch_all(stmt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_products_statement_filters_and_orders() {
        let mut stmt = select_products();
        stmt.and_where(Expr::col(Products::Active).eq(true))
            .order_by(Products::Name, Order::Asc);
        let (sql, values) = stmt.build(PostgresQueryBuilder);
        assert!(sql.contains("FROM \"products\""));
        assert!(sql.contains("ORDER BY \"name\" ASC"));
        assert_eq!(values.iter().count(), 1);
    }

    #[test]
    fn test_products_by_category_statement_has_no_active_filter() {
        let mut stmt = select_products();
        stmt.and_where(Expr::col(Products::CategoryId).eq(5))
            .order_by(Products::Name, Order::Asc);
        let (sql, _values) = stmt.build(PostgresQueryBuilder);
        assert!(sql.contains("category_id"));
        assert!(!sql.contains("active"));
    }
}
