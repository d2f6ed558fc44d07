//! Authentication error types.

use cofre_core::error::CofreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User is not active")]
    AccountInactive,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for CofreError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::AccountInactive
            | AuthError::TokenExpired
            | AuthError::TokenInvalid(_) => CofreError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => CofreError::Internal(msg),
        }
    }
}
