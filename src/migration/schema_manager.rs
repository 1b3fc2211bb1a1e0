//! Schema operations against an executor.

use crate::executor::{DbError, PgExecutor};
use crate::migration::Migration;

/// Applies migration statements through a [`PgExecutor`].
pub struct SchemaManager<'a> {
    executor: &'a dyn PgExecutor,
}

impl<'a> SchemaManager<'a> {
    pub fn new(executor: &'a dyn PgExecutor) -> Self {
        Self { executor }
    }

    /// Execute a single DDL statement.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the execution fails.
    pub fn execute(&self, sql: &str) -> Result<u64, DbError> {
        log::debug!("schema statement: {sql}");
        self.executor.execute(sql, &[])
    }

    /// Run all of a migration's up statements, in order.
    ///
    /// # Errors
    ///
    /// Returns `DbError` on the first failing statement; earlier statements
    /// stay applied (DDL is not transactional here).
    pub fn apply(&self, migration: &dyn Migration) -> Result<(), DbError> {
        for statement in migration.up() {
            self.execute(&statement)?;
        }
        Ok(())
    }

    /// Run all of a migration's down statements, in order.
    ///
    /// # Errors
    ///
    /// Returns `DbError` on the first failing statement.
    pub fn revert(&self, migration: &dyn Migration) -> Result<(), DbError> {
        for statement in migration.down() {
            self.execute(&statement)?;
        }
        Ok(())
    }
}
