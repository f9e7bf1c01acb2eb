//! # Store Module
//!
//! The query-execution collaborator. Everything above this module talks to
//! the relational store through [`QueryExecutor`]: statement text plus
//! positional parameters in, rows plus a row count out. User input is only
//! ever bound as a parameter, never spliced into statement text.

pub mod errors;
pub mod memory;
pub mod postgres;
pub mod seed;

pub use errors::{StoreError, StoreResult};
pub use memory::{Dataset, MemoryStore};
pub use postgres::{DatabaseConfig, PgExecutor};

use async_trait::async_trait;
use serde_json::{Map, Value};

/// One result row, keyed by column name in select order
pub type Row = Map<String, Value>;

/// A positional statement parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Text(String),
}

impl SqlValue {
    /// Coerce this value to an integer for the parameter at `position`
    /// (1-based, as in `$1`).
    ///
    /// Text that does not parse as an integer is a type mismatch, the same
    /// condition PostgreSQL reports as `invalid_text_representation`.
    pub fn to_integer(&self, position: usize) -> StoreResult<Option<i64>> {
        match self {
            SqlValue::Null => Ok(None),
            SqlValue::Int(n) => Ok(Some(*n)),
            SqlValue::Text(s) => s.trim().parse::<i64>().map(Some).map_err(|_| {
                StoreError::TypeMismatch(format!(
                    "parameter ${} expects an integer, got {:?}",
                    position, s
                ))
            }),
        }
    }

    /// Render this value as text; integers are formatted in decimal
    pub fn to_text(&self) -> Option<String> {
        match self {
            SqlValue::Null => None,
            SqlValue::Int(n) => Some(n.to_string()),
            SqlValue::Text(s) => Some(s.clone()),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(n: i64) -> Self {
        SqlValue::Int(n)
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        SqlValue::Text(s)
    }
}

/// Rows returned by a statement together with the affected/returned count
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub rows: Vec<Row>,
    pub row_count: u64,
}

impl QueryResult {
    pub fn new(rows: Vec<Row>) -> Self {
        let row_count = rows.len() as u64;
        Self { rows, row_count }
    }

    /// Take the first row, if any
    pub fn into_first(self) -> Option<Row> {
        self.rows.into_iter().next()
    }
}

/// Executes parameterized statements against the relational store
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run `sql` with positional `params` bound to `$1..$n`
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> StoreResult<QueryResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_coercion() {
        assert_eq!(SqlValue::Int(7).to_integer(1).unwrap(), Some(7));
        assert_eq!(SqlValue::from(" 12 ").to_integer(1).unwrap(), Some(12));
        assert_eq!(SqlValue::Null.to_integer(1).unwrap(), None);

        let err = SqlValue::from("banana").to_integer(2).unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(err.to_string().contains("$2"));
    }

    #[test]
    fn test_text_rendering() {
        assert_eq!(SqlValue::Int(-3).to_text().as_deref(), Some("-3"));
        assert_eq!(SqlValue::from("cats").to_text().as_deref(), Some("cats"));
        assert_eq!(SqlValue::Null.to_text(), None);
    }

    #[test]
    fn test_query_result_counts_rows() {
        let mut row = Row::new();
        row.insert("slug".to_string(), Value::from("cats"));
        let result = QueryResult::new(vec![row.clone(), row]);
        assert_eq!(result.row_count, 2);
        assert!(result.into_first().is_some());
    }
}
