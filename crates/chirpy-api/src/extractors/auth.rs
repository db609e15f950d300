//! Authentication extractors
//!
//! Pull credentials out of the `Authorization` header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use chirpy_common::extract_bearer;
use chirpy_core::UserId;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user resolved from a Bearer access token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: UserId,
}

impl AuthUser {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let user_id = app_state.sessions().authenticate(&parts.headers).map_err(|e| {
            tracing::warn!(error = %e, "Rejected access token");
            e
        })?;

        Ok(AuthUser::new(user_id))
    }
}

/// Raw Bearer credential, not validated
///
/// Used where the Bearer value is an opaque refresh token rather than an
/// access token.
#[derive(Clone)]
pub struct BearerToken(pub String);

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BearerToken").field(&"<redacted>").finish()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(&parts.headers)?;
        Ok(BearerToken(token))
    }
}
