//! Session service
//!
//! Login, access token refresh, refresh token revocation, and request
//! authentication. Failure reasons are deliberately collapsed: every login
//! failure is `InvalidCredentials` and every refresh/revoke failure is
//! `InvalidToken`, so callers cannot learn which emails or tokens exist. Store
//! errors are not collapsed and surface as server errors.

use http::HeaderMap;
use tracing::{error, info, instrument, warn};

use chirpy_common::auth::{extract_api_key, extract_bearer, verify_api_key};
use chirpy_common::AppError;
use chirpy_core::entities::{RefreshToken, User};
use chirpy_core::error::DomainError;
use chirpy_core::value_objects::UserId;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: RefreshToken,
}

/// Session service
pub struct SessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionService<'a> {
    /// Create a new SessionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Verify credentials and issue an access/refresh token pair
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<Session> {
        let Some(user) = self.ctx.user_repo().find_by_email(email).await? else {
            warn!("Login failed: unknown email");
            return Err(ServiceError::invalid_credentials());
        };

        match self.ctx.passwords().verify(password, &user.password_hash) {
            Ok(true) => {}
            Ok(false) => {
                warn!(user_id = %user.id, "Login failed: invalid password");
                return Err(ServiceError::invalid_credentials());
            }
            Err(e) => {
                // Reported to the client like any other mismatch
                error!(user_id = %user.id, error = %e, "Login failed: stored hash unusable");
                return Err(ServiceError::invalid_credentials());
            }
        }

        let access_token = self
            .ctx
            .access_tokens()
            .issue(user.id, self.ctx.access_token_ttl())?;
        let refresh_token = self
            .ctx
            .refresh_tokens()
            .create(user.id, self.ctx.refresh_token_ttl())
            .await?;

        info!(user_id = %user.id, "User logged in successfully");

        Ok(Session {
            user,
            access_token,
            refresh_token,
        })
    }

    /// Issue a new access token for a usable refresh token
    ///
    /// The refresh token itself is not rotated.
    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> ServiceResult<String> {
        let token = self.usable_refresh_token(refresh_token).await?;

        let Some(user) = self.ctx.user_repo().find_by_id(token.user_id).await? else {
            warn!(user_id = %token.user_id, "Refresh failed: owning user no longer exists");
            return Err(ServiceError::invalid_token());
        };

        let access_token = self
            .ctx
            .access_tokens()
            .issue(user.id, self.ctx.access_token_ttl())?;

        info!(user_id = %user.id, "Access token refreshed");
        Ok(access_token)
    }

    /// Revoke a usable refresh token
    #[instrument(skip_all)]
    pub async fn revoke(&self, refresh_token: &str) -> ServiceResult<()> {
        let token = self.usable_refresh_token(refresh_token).await?;

        self.ctx.refresh_tokens().revoke(&token.token).await?;

        info!(user_id = %token.user_id, "Refresh token revoked");
        Ok(())
    }

    /// Resolve the caller from an `Authorization: Bearer <access token>` header
    pub fn authenticate(&self, headers: &HeaderMap) -> ServiceResult<UserId> {
        let token = extract_bearer(headers)?;
        self.validate_access_token(&token)
    }

    /// Validate an access token and return its subject
    pub fn validate_access_token(&self, token: &str) -> ServiceResult<UserId> {
        Ok(self.ctx.access_tokens().validate(token)?)
    }

    /// Check an `Authorization: ApiKey <key>` header against the configured
    /// payment provider key
    ///
    /// Always fails with `InvalidApiKey` when no key is configured.
    pub fn verify_api_key(&self, headers: &HeaderMap) -> ServiceResult<()> {
        match self.ctx.polka_key() {
            Some(expected) => Ok(verify_api_key(headers, expected)?),
            None => {
                extract_api_key(headers)?;
                Err(AppError::InvalidApiKey.into())
            }
        }
    }

    /// Look up a refresh token and require it to be usable right now
    async fn usable_refresh_token(&self, value: &str) -> ServiceResult<RefreshToken> {
        let token = match self.ctx.refresh_tokens().lookup(value).await {
            Ok(token) => token,
            Err(ServiceError::Domain(DomainError::RefreshTokenNotFound)) => {
                warn!("Refresh token not found");
                return Err(ServiceError::invalid_token());
            }
            Err(e) => return Err(e),
        };

        if !self.ctx.refresh_tokens().is_usable(&token) {
            warn!(
                user_id = %token.user_id,
                revoked = token.is_revoked(),
                "Refresh token no longer usable"
            );
            return Err(ServiceError::invalid_token());
        }

        Ok(token)
    }
}
