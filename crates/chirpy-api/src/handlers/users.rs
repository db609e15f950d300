//! User handlers
//!
//! Account registration and credential updates.

use axum::{extract::State, Json};
use chirpy_service::{AccountService, CreateUserRequest, UpdateUserRequest, UserResponse};

use crate::extractors::AuthUser;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new user
///
/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<Created<Json<UserResponse>>> {
    let service = AccountService::new(state.service_context());
    let user = service.register(request).await?;
    Ok(Created(Json(user.into())))
}

/// Replace the caller's email and password
///
/// PUT /api/users
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = AccountService::new(state.service_context());
    let user = service.update_credentials(auth.user_id, request).await?;
    Ok(Json(user.into()))
}
