//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    /// A UNIQUE constraint rejected the write
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Record not found
    #[error("record not found")]
    NotFound,

    /// A stored value could not be mapped onto its domain type
    #[error("invalid stored data: {0}")]
    InvalidData(String),
}

impl DbError {
    /// Check if this is a unique constraint violation
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::UniqueViolation(db.message().to_string())
            }
            sqlx::Error::RowNotFound => Self::NotFound,
            _ => Self::Sqlx(err),
        }
    }
}

/// Result type for repository operations
pub type DbResult<T> = Result<T, DbError>;
