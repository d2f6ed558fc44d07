//! Authentication configuration.

/// Configuration for the authentication service.
///
/// Access and refresh tokens are signed with independent secrets, so
/// one can never be passed off as the other.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for access token signing.
    pub access_token_secret: String,
    /// HMAC secret for refresh token signing.
    pub refresh_token_secret: String,
    /// Access token lifetime in seconds (default: 86_400 = 24 hours).
    pub access_token_lifetime_secs: u64,
    /// Refresh token lifetime in seconds (default: 604_800 = 7 days).
    pub refresh_token_lifetime_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: String::new(),
            refresh_token_secret: String::new(),
            access_token_lifetime_secs: 86_400,
            refresh_token_lifetime_secs: 604_800,
        }
    }
}
