//! Statement execution over `may_postgres`.
//!
//! [`PgExecutor`] abstracts database execution so the Postgres repository and
//! the migration runner can work against a direct client today and a pooled
//! connection later without changes.

use may_postgres::types::ToSql;
use may_postgres::{Client, Error as PostgresError, Row};
use std::fmt;

/// Storage-layer error type.
#[derive(Debug)]
pub enum DbError {
    /// `PostgreSQL` error from `may_postgres`
    Postgres(PostgresError),
    /// Query execution error
    Query(String),
    /// Row parsing/conversion error
    Parse(String),
    /// Other execution errors
    Other(String),
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbError::Postgres(e) => {
                write!(f, "PostgreSQL error: {e}")
            }
            DbError::Query(s) => {
                write!(f, "Query error: {s}")
            }
            DbError::Parse(s) => {
                write!(f, "Parse error: {s}")
            }
            DbError::Other(s) => {
                write!(f, "Execution error: {s}")
            }
        }
    }
}

impl std::error::Error for DbError {}

impl From<PostgresError> for DbError {
    fn from(err: PostgresError) -> Self {
        DbError::Postgres(err)
    }
}

/// Trait for executing database statements.
///
/// All calls are blocking and safe to issue from inside `may` coroutines.
pub trait PgExecutor {
    /// Execute a statement and return the number of rows affected.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the execution fails.
    fn execute(&self, query: &str, params: &[&dyn ToSql]) -> Result<u64, DbError>;

    /// Execute a query expected to return exactly one row.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the execution fails or the row count is not one.
    fn query_one(&self, query: &str, params: &[&dyn ToSql]) -> Result<Row, DbError>;

    /// Execute a query and return all rows.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the execution fails.
    fn query_all(&self, query: &str, params: &[&dyn ToSql]) -> Result<Vec<Row>, DbError>;

    /// Execute a query and return the first row, if any.
    ///
    /// Intended for primary-key lookups, where at most one row can match.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the execution fails.
    fn query_opt(&self, query: &str, params: &[&dyn ToSql]) -> Result<Option<Row>, DbError> {
        let rows = self.query_all(query, params)?;
        Ok(rows.into_iter().next())
    }
}

/// [`PgExecutor`] backed directly by a `may_postgres::Client`.
pub struct MayPostgresExecutor {
    client: Client,
}

impl MayPostgresExecutor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Consume the executor and return the underlying client.
    pub fn into_client(self) -> Client {
        self.client
    }
}

impl PgExecutor for MayPostgresExecutor {
    fn execute(&self, query: &str, params: &[&dyn ToSql]) -> Result<u64, DbError> {
        self.client
            .execute(query, params)
            .map_err(DbError::Postgres)
    }

    fn query_one(&self, query: &str, params: &[&dyn ToSql]) -> Result<Row, DbError> {
        self.client
            .query_one(query, params)
            .map_err(DbError::Postgres)
    }

    fn query_all(&self, query: &str, params: &[&dyn ToSql]) -> Result<Vec<Row>, DbError> {
        self.client.query(query, params).map_err(DbError::Postgres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_display() {
        let err = DbError::Query("bad statement".to_string());
        let display = err.to_string();
        assert!(display.contains("Query error"));
        assert!(display.contains("bad statement"));
    }

    #[test]
    fn test_db_error_variants_display() {
        assert!(DbError::Parse("x".to_string())
            .to_string()
            .contains("Parse error"));
        assert!(DbError::Other("x".to_string())
            .to_string()
            .contains("Execution error"));
    }
}
