//! JWT access and refresh token issuance/verification.
//!
//! Both token kinds are HS256 JWTs signed with independent secrets.
//! Access tokens carry the subject and email; refresh tokens only the
//! subject.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject — user ID (UUID string).
    pub sub: String,
    /// Login email at issuance time.
    pub email: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Claims embedded in every refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    /// Subject — user ID (UUID string).
    pub sub: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Issue a signed access token for a user.
pub fn issue_access_token(
    user_id: Uuid,
    email: &str,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = AccessTokenClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        iat: now,
        exp: now + config.access_token_lifetime_secs as i64,
    };

    let key = EncodingKey::from_secret(config.access_token_secret.as_bytes());
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Issue a signed refresh token for a user.
pub fn issue_refresh_token(user_id: Uuid, config: &AuthConfig) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = RefreshTokenClaims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + config.refresh_token_lifetime_secs as i64,
    };

    let key = EncodingKey::from_secret(config.refresh_token_secret.as_bytes());
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Decode and verify an access token (signature + expiry).
pub fn decode_access_token(token: &str, config: &AuthConfig) -> Result<AccessTokenClaims, AuthError> {
    let key = DecodingKey::from_secret(config.access_token_secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    jsonwebtoken::decode::<AccessTokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

/// Decode and verify a refresh token (signature + expiry).
pub fn decode_refresh_token(
    token: &str,
    config: &AuthConfig,
) -> Result<RefreshTokenClaims, AuthError> {
    let key = DecodingKey::from_secret(config.refresh_token_secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    jsonwebtoken::decode::<RefreshTokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            access_token_secret: "access-secret".into(),
            refresh_token_secret: "refresh-secret".into(),
            access_token_lifetime_secs: 86_400,
            refresh_token_lifetime_secs: 604_800,
        }
    }

    #[test]
    fn access_token_round_trip() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = issue_access_token(user_id, "alice@example.com", &config).unwrap();
        let claims = decode_access_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "alice@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn refresh_token_round_trip() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = issue_refresh_token(user_id, &config).unwrap();
        let claims = decode_refresh_token(&token, &config).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
    }

    #[test]
    fn access_token_is_not_a_valid_refresh_token() {
        let config = test_config();
        let token = issue_access_token(Uuid::new_v4(), "a@b.com", &config).unwrap();
        let err = decode_refresh_token(&token, &config).unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid(_)));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = test_config();
        let token = issue_access_token(Uuid::new_v4(), "a@b.com", &config).unwrap();

        let other = AuthConfig {
            access_token_secret: "different".into(),
            ..test_config()
        };
        let err = decode_access_token(&token, &other).unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        let now = Utc::now().timestamp();
        // Encode claims that expired well outside the default leeway.
        let claims = AccessTokenClaims {
            sub: Uuid::new_v4().to_string(),
            email: "a@b.com".into(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let key = EncodingKey::from_secret(config.access_token_secret.as_bytes());
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key).unwrap();

        let err = decode_access_token(&token, &config).unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[test]
    fn garbage_is_invalid() {
        let config = test_config();
        let err = decode_access_token("not.a.jwt", &config).unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid(_)));
    }
}
