//! Error types for the COFRE system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CofreError {
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: String, id: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CofreError {
    /// Shorthand for a [`CofreError::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        CofreError::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a [`CofreError::NotFound`] for the given entity/id.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        CofreError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

pub type CofreResult<T> = Result<T, CofreError>;
