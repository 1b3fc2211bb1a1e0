//! Bind-parameter conversion for sea-query statements.
//!
//! Converts sea-query `Value`s into `ToSql` trait objects for
//! `may_postgres`, using a two-pass pattern:
//! 1. First pass: collect all values into typed vectors
//! 2. Second pass: create references to the stored values
//!
//! The references stay valid for the duration of the closure. Repository
//! read statements only ever bind booleans and integers (active flags and
//! ids); anything else is rejected rather than silently mangled.

use may_postgres::types::ToSql;
use sea_query::Value;

use crate::executor::DbError;

/// Convert sea-query values to `may_postgres` parameters and run `f` with
/// them.
///
/// # Errors
///
/// Returns `DbError::Other` if an unsupported value type is encountered.
pub(crate) fn with_bound_params<F, R>(values: &sea_query::Values, f: F) -> Result<R, DbError>
where
    F: FnOnce(&[&dyn ToSql]) -> Result<R, DbError>,
{
    let mut bools: Vec<bool> = Vec::new();
    let mut ints: Vec<i32> = Vec::new();
    let mut big_ints: Vec<i64> = Vec::new();
    let mut nulls: Vec<Option<i32>> = Vec::new();

    // First pass: collect all values into typed vectors
    for value in values.iter() {
        match value {
            Value::Bool(Some(b)) => bools.push(*b),
            Value::Int(Some(i)) => ints.push(*i),
            Value::BigInt(Some(i)) => big_ints.push(*i),
            Value::Bool(None) | Value::Int(None) | Value::BigInt(None) => nulls.push(None),
            _ => {
                return Err(DbError::Other(format!(
                    "Unsupported value type in query: {:?}",
                    value
                )));
            }
        }
    }

    // Second pass: create references to the stored values
    let mut bool_idx = 0;
    let mut int_idx = 0;
    let mut big_int_idx = 0;
    let mut null_idx = 0;

    let mut params: Vec<&dyn ToSql> = Vec::new();

    for value in values.iter() {
        match value {
            Value::Bool(Some(_)) => {
                params.push(&bools[bool_idx] as &dyn ToSql);
                bool_idx += 1;
            }
            Value::Int(Some(_)) => {
                params.push(&ints[int_idx] as &dyn ToSql);
                int_idx += 1;
            }
            Value::BigInt(Some(_)) => {
                params.push(&big_ints[big_int_idx] as &dyn ToSql);
                big_int_idx += 1;
            }
            Value::Bool(None) | Value::Int(None) | Value::BigInt(None) => {
                params.push(&nulls[null_idx] as &dyn ToSql);
                null_idx += 1;
            }
            _ => unreachable!("rejected in first pass"),
        }
    }

    f(&params)
}
