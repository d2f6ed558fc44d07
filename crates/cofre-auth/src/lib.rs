//! COFRE Auth — password hashing, JWT issuance/validation, and the
//! registration/login/refresh flows.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthService, AuthTokens, RegisterInput};
pub use token::{AccessTokenClaims, RefreshTokenClaims};
