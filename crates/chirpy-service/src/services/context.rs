//! Service context - dependency container for services
//!
//! Holds the repositories, the refresh token store, the access token codec,
//! and the session lifetimes needed by services.

use chrono::Duration;
use std::sync::Arc;

use chirpy_common::auth::{AccessTokenCodec, PasswordService};
use chirpy_common::JwtConfig;
use chirpy_core::traits::{RefreshTokenRepository, UserRepository};

use super::error::{ServiceError, ServiceResult};
use super::refresh_token::{default_refresh_token_ttl, RefreshTokenStore};

/// Default access token lifetime
pub fn default_access_token_ttl() -> Duration {
    Duration::hours(1)
}

/// Service context containing all dependencies
///
/// Cheap to clone; every dependency sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,

    // Token handling
    refresh_tokens: RefreshTokenStore,
    access_tokens: Arc<AccessTokenCodec>,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,

    // Credentials
    passwords: PasswordService,
    polka_key: Option<Arc<str>>,
}

impl ServiceContext {
    /// Create a new service context with default lifetimes
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        refresh_token_repo: Arc<dyn RefreshTokenRepository>,
        jwt_secret: &[u8],
    ) -> Self {
        Self {
            user_repo,
            refresh_tokens: RefreshTokenStore::new(refresh_token_repo),
            access_tokens: Arc::new(AccessTokenCodec::new(jwt_secret)),
            access_token_ttl: default_access_token_ttl(),
            refresh_token_ttl: default_refresh_token_ttl(),
            passwords: PasswordService::new(),
            polka_key: None,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    // === Tokens ===

    /// Get the refresh token store
    pub fn refresh_tokens(&self) -> &RefreshTokenStore {
        &self.refresh_tokens
    }

    /// Get the access token codec
    pub fn access_tokens(&self) -> &AccessTokenCodec {
        self.access_tokens.as_ref()
    }

    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        self.refresh_token_ttl
    }

    // === Credentials ===

    /// Get the password service
    pub fn passwords(&self) -> &PasswordService {
        &self.passwords
    }

    /// API key expected from the payment provider, if configured
    pub fn polka_key(&self) -> Option<&str> {
        self.polka_key.as_deref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("polka_key", &self.polka_key.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    refresh_token_repo: Option<Arc<dyn RefreshTokenRepository>>,
    jwt_secret: Option<Vec<u8>>,
    access_token_ttl: Option<Duration>,
    refresh_token_ttl: Option<Duration>,
    polka_key: Option<String>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn refresh_token_repo(mut self, repo: Arc<dyn RefreshTokenRepository>) -> Self {
        self.refresh_token_repo = Some(repo);
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<Vec<u8>>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = Some(ttl);
        self
    }

    pub fn refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = Some(ttl);
        self
    }

    pub fn polka_key(mut self, key: Option<String>) -> Self {
        self.polka_key = key;
        self
    }

    /// Take secret and lifetimes from loaded configuration
    pub fn jwt_config(self, config: &JwtConfig) -> Self {
        self.jwt_secret(config.secret.as_bytes())
            .access_token_ttl(config.access_token_ttl())
            .refresh_token_ttl(config.refresh_token_ttl())
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    /// or the signing secret is empty
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let user_repo = self
            .user_repo
            .ok_or_else(|| ServiceError::validation("user_repo is required"))?;
        let refresh_token_repo = self
            .refresh_token_repo
            .ok_or_else(|| ServiceError::validation("refresh_token_repo is required"))?;
        let jwt_secret = self
            .jwt_secret
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| ServiceError::validation("jwt_secret is required"))?;

        let mut ctx = ServiceContext::new(user_repo, refresh_token_repo, &jwt_secret);
        if let Some(ttl) = self.access_token_ttl {
            ctx.access_token_ttl = ttl;
        }
        if let Some(ttl) = self.refresh_token_ttl {
            ctx.refresh_token_ttl = ttl;
        }
        ctx.polka_key = self.polka_key.map(Arc::from);

        Ok(ctx)
    }
}
