//! Error types for the model layer.

use thiserror::Error;

/// Result type alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Error types for model operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Input rejected before any SQL was built or executed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Row not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same key already exists.
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Unique constraint violation.
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation.
    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    /// Row decode/mapping error.
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Database connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error.
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Pool error.
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),
}

impl ModelError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a duplicate error.
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate(message.into())
    }

    /// Create a decode error for a specific column.
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a not found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a duplicate error.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }

    /// Parse a tokio_postgres error into a more specific ModelError.
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            let constraint = db_err.constraint().unwrap_or("unknown");
            let message = db_err.message();

            match db_err.code().code() {
                "23505" => return Self::UniqueViolation(format!("{}: {}", constraint, message)),
                "23503" => {
                    return Self::ForeignKeyViolation(format!("{}: {}", constraint, message));
                }
                "23514" => return Self::CheckViolation(format!("{}: {}", constraint, message)),
                _ => {}
            }
        }
        Self::Query(err)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for ModelError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_match_variants() {
        assert!(ModelError::validation("no data to update").is_validation());
        assert!(ModelError::not_found("No company: nope").is_not_found());
        assert!(ModelError::duplicate("Duplicate company: acme").is_duplicate());
        assert!(!ModelError::validation("x").is_not_found());
    }

    #[test]
    fn display_carries_message() {
        let err = ModelError::validation("minEmployees must be <= maxEmployees");
        assert_eq!(
            err.to_string(),
            "Validation error: minEmployees must be <= maxEmployees"
        );
    }
}
