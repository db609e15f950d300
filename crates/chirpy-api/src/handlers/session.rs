//! Session handlers
//!
//! Login, access token refresh, and refresh token revocation.

use axum::{extract::State, Json};
use chirpy_service::{LoginRequest, LoginResponse, RefreshResponse};

use crate::extractors::BearerToken;
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Login with email and password
///
/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let session = state
        .sessions()
        .login(&request.email, &request.password)
        .await?;
    Ok(Json(session.into()))
}

/// Exchange a refresh token for a new access token
///
/// POST /api/refresh
pub async fn refresh(
    State(state): State<AppState>,
    BearerToken(refresh_token): BearerToken,
) -> ApiResult<Json<RefreshResponse>> {
    let token = state.sessions().refresh(&refresh_token).await?;
    Ok(Json(RefreshResponse { token }))
}

/// Revoke a refresh token
///
/// POST /api/revoke
pub async fn revoke(
    State(state): State<AppState>,
    BearerToken(refresh_token): BearerToken,
) -> ApiResult<NoContent> {
    state.sessions().revoke(&refresh_token).await?;
    Ok(NoContent)
}
