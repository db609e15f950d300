//! Entity to DTO mappers

use chirpy_core::entities::User;

use super::responses::{LoginResponse, UserResponse};
use crate::services::Session;

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            updated_at: user.updated_at,
            email: user.email.clone(),
            is_chirpy_red: user.is_chirpy_red,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<Session> for LoginResponse {
    fn from(session: Session) -> Self {
        Self {
            user: UserResponse::from(&session.user),
            token: session.access_token,
            refresh_token: session.refresh_token.token,
        }
    }
}
