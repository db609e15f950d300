//! Refresh token store
//!
//! Generates opaque refresh tokens and manages their persisted lifecycle:
//! `Active` until either `expires_at` passes or `revoked_at` is set, both of
//! which are terminal. Expiry is evaluated lazily on every check.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use std::sync::Arc;
use tracing::{debug, instrument};

use chirpy_common::AppError;
use chirpy_core::entities::RefreshToken;
use chirpy_core::error::DomainError;
use chirpy_core::traits::RefreshTokenRepository;
use chirpy_core::value_objects::UserId;

use super::error::{ServiceError, ServiceResult};

/// Random bytes per token; hex encoding doubles this to 64 characters
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Default lifetime for tokens created at login
pub fn default_refresh_token_ttl() -> Duration {
    Duration::days(60)
}

/// Store for refresh tokens backed by a [`RefreshTokenRepository`]
#[derive(Clone)]
pub struct RefreshTokenStore {
    repo: Arc<dyn RefreshTokenRepository>,
}

impl RefreshTokenStore {
    pub fn new(repo: Arc<dyn RefreshTokenRepository>) -> Self {
        Self { repo }
    }

    /// Draw a fresh token value from the OS random source
    ///
    /// # Errors
    /// Returns `AppError::EntropyUnavailable` if the source fails
    pub fn generate() -> Result<String, AppError> {
        Self::generate_with(&mut OsRng)
    }

    /// Draw a token value from the given random source
    ///
    /// # Errors
    /// Returns `AppError::EntropyUnavailable` if the source fails
    pub fn generate_with<R: RngCore + ?Sized>(rng: &mut R) -> Result<String, AppError> {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|e| AppError::EntropyUnavailable(e.to_string()))?;
        Ok(hex::encode(bytes))
    }

    /// Generate and persist a new active token for `user_id`
    #[instrument(skip(self))]
    pub async fn create(&self, user_id: UserId, ttl: Duration) -> ServiceResult<RefreshToken> {
        self.create_at(user_id, ttl, Utc::now()).await
    }

    /// Like [`Self::create`] with an explicit creation instant
    #[instrument(skip(self))]
    pub async fn create_at(
        &self,
        user_id: UserId,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> ServiceResult<RefreshToken> {
        let token = RefreshToken::issue(Self::generate()?, user_id, now, ttl)
            .ok_or_else(|| AppError::lifetime_overflow("refresh token", ttl))?;
        self.repo.create(&token).await?;

        debug!(expires_at = %token.expires_at, "Refresh token created");
        Ok(token)
    }

    /// Find the row for a token value
    ///
    /// # Errors
    /// Returns `DomainError::RefreshTokenNotFound` if no row matches
    #[instrument(skip_all)]
    pub async fn lookup(&self, token: &str) -> ServiceResult<RefreshToken> {
        self.repo
            .find_by_token(token)
            .await?
            .ok_or(ServiceError::Domain(DomainError::RefreshTokenNotFound))
    }

    /// Usable iff not revoked and not past `expires_at`, as of now
    pub fn is_usable(&self, token: &RefreshToken) -> bool {
        token.is_usable_at(Utc::now())
    }

    /// Mark the token revoked as of now
    ///
    /// Idempotent: revoking a revoked, expired, or unknown token is not an error.
    #[instrument(skip_all)]
    pub async fn revoke(&self, token: &str) -> ServiceResult<()> {
        self.revoke_at(token, Utc::now()).await
    }

    /// Like [`Self::revoke`] with an explicit revocation instant
    #[instrument(skip(self, token))]
    pub async fn revoke_at(&self, token: &str, now: DateTime<Utc>) -> ServiceResult<()> {
        if !self.repo.revoke(token, now).await? {
            debug!("Revoke matched no refresh token row");
        }
        Ok(())
    }
}

impl std::fmt::Debug for RefreshTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Random source that always fails
    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {}

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy source offline"))
        }
    }

    #[test]
    fn test_generate_format() {
        let token = RefreshTokenStore::generate().unwrap();
        assert_eq!(token.len(), 64);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_generate_is_unique() {
        let tokens: HashSet<String> = (0..10_000)
            .map(|_| RefreshTokenStore::generate().unwrap())
            .collect();
        assert_eq!(tokens.len(), 10_000);
    }

    #[test]
    fn test_broken_entropy_source() {
        let result = RefreshTokenStore::generate_with(&mut BrokenRng);
        assert!(matches!(result, Err(AppError::EntropyUnavailable(_))));
    }

    #[test]
    fn test_default_ttl_is_sixty_days() {
        assert_eq!(default_refresh_token_ttl(), Duration::hours(24 * 60));
    }
}
