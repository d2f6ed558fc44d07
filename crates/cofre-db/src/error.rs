//! Database-specific error types and conversions.

use cofre_core::error::CofreError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Row decode error: {0}")]
    Decode(String),

    /// Insert reported success but the re-read found nothing.
    #[error("{0}")]
    Inconsistent(String),
}

impl From<DbError> for CofreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => CofreError::NotFound { entity, id },
            DbError::Inconsistent(msg) => CofreError::Internal(msg),
            other => CofreError::Database(other.to_string()),
        }
    }
}
