//! Refresh token entity <-> model mapper

use chirpy_core::entities::RefreshToken;
use chirpy_core::value_objects::UserId;
use uuid::Uuid;

use crate::models::RefreshTokenModel;

/// Convert RefreshTokenModel to RefreshToken entity
impl From<RefreshTokenModel> for RefreshToken {
    fn from(model: RefreshTokenModel) -> Self {
        RefreshToken {
            token: model.token,
            user_id: UserId::from_uuid(model.user_id),
            created_at: model.created_at,
            expires_at: model.expires_at,
            revoked_at: model.revoked_at,
        }
    }
}

/// Borrowed column values for inserting a refresh token row
pub struct RefreshTokenInsert<'a> {
    pub token: &'a str,
    pub user_id: Uuid,
}

impl<'a> RefreshTokenInsert<'a> {
    pub fn new(token: &'a RefreshToken) -> Self {
        Self {
            token: &token.token,
            user_id: token.user_id.into_inner(),
        }
    }
}
