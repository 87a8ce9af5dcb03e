//! Row mapping traits and utilities.

use tokio_postgres::Row;
use tokio_postgres::types::FromSql;

use crate::error::{ModelError, ModelResult};

/// Trait for converting a database row into a Rust struct.
pub trait FromRow: Sized {
    /// Convert a database row into Self.
    fn from_row(row: &Row) -> ModelResult<Self>;
}

/// Column access with decode failures mapped into [`ModelError::Decode`].
pub trait RowExt {
    /// Get a column value by name.
    fn try_get_column<T>(&self, column: &str) -> ModelResult<T>
    where
        T: for<'a> FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> ModelResult<T>
    where
        T: for<'a> FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| ModelError::decode(column, e.to_string()))
    }
}
