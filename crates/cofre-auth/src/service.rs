//! Authentication service — registration, login, and token refresh.

use cofre_core::error::CofreResult;
use cofre_core::models::user::{Address, User};
use cofre_core::repository::UserRepository;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token::{self, AccessTokenClaims};

/// Input for the registration flow.
#[derive(Debug)]
pub struct RegisterInput {
    pub nome: String,
    pub email: String,
    pub password: String,
    pub endereco: Address,
}

/// Successful registration/login result.
#[derive(Debug)]
pub struct AuthTokens {
    /// The authenticated user (password field holds the hash).
    pub user: User,
    /// Signed JWT access token.
    pub token: String,
    /// Signed JWT refresh token.
    pub refresh_token: String,
}

/// Authentication service.
///
/// Generic over the repository trait so the auth layer has no
/// dependency on the database crate.
pub struct AuthService<R: UserRepository> {
    repo: R,
    config: AuthConfig,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self { repo, config }
    }

    /// Register a new user: hash the password, persist, issue tokens.
    ///
    /// The email pre-check only looks at non-deleted users, so a
    /// deleted user's email may be reused.
    pub async fn register(&self, input: RegisterInput) -> CofreResult<AuthTokens> {
        if self.repo.email_exists(&input.email, None).await? {
            return Err(cofre_core::CofreError::validation(
                "User with this email already exists",
            ));
        }

        let hashed = password::hash_password(&input.password)?;

        let mut user = User::new(input.nome, input.email, input.endereco);
        user.set_password(hashed)?;

        let created = self.repo.create(user).await?;

        let access = token::issue_access_token(created.id, &created.email, &self.config)?;
        let refresh = token::issue_refresh_token(created.id, &self.config)?;

        Ok(AuthTokens {
            user: created,
            token: access,
            refresh_token: refresh,
        })
    }

    /// Authenticate with email + password and issue tokens.
    ///
    /// Unknown emails and bad passwords produce the same error so the
    /// response does not leak which one was wrong.
    pub async fn login(&self, email: &str, password: &str) -> CofreResult<AuthTokens> {
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.is_active() {
            return Err(AuthError::AccountInactive.into());
        }

        // Users created outside the registration path have no
        // credential and cannot log in.
        if !user.has_password() {
            return Err(AuthError::InvalidCredentials.into());
        }

        let valid = password::verify_password(password, &user.password)?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        let access = token::issue_access_token(user.id, &user.email, &self.config)?;
        let refresh = token::issue_refresh_token(user.id, &self.config)?;

        Ok(AuthTokens {
            user,
            token: access,
            refresh_token: refresh,
        })
    }

    /// Exchange a valid refresh token for a fresh access token.
    pub async fn refresh(&self, refresh_token: &str) -> CofreResult<String> {
        let claims = token::decode_refresh_token(refresh_token, &self.config)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|e| AuthError::TokenInvalid(format!("bad subject: {e}")))?;

        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| cofre_core::CofreError::not_found("User", user_id))?;

        Ok(token::issue_access_token(user.id, &user.email, &self.config)?)
    }

    /// Stateless access-token verification for request middleware.
    pub fn verify_token(&self, token: &str) -> CofreResult<AccessTokenClaims> {
        Ok(token::decode_access_token(token, &self.config)?)
    }
}
