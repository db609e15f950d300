//! User entity <-> model mapper

use chirpy_core::entities::{PasswordHash, User};
use chirpy_core::value_objects::UserId;
use uuid::Uuid;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::from_uuid(model.id),
            email: model.email,
            password_hash: PasswordHash::new(model.hashed_password),
            is_chirpy_red: model.is_chirpy_red,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Borrowed column values for inserting a user row
pub struct UserInsert<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub hashed_password: &'a str,
    pub is_chirpy_red: bool,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a User) -> Self {
        Self {
            id: user.id.into_inner(),
            email: &user.email,
            hashed_password: user.password_hash.expose(),
            is_chirpy_red: user.is_chirpy_red,
        }
    }
}
