//! Account service
//!
//! Registration and credential updates. No password policy is enforced here;
//! any string, including the empty one, is hashed as given.

use tracing::{info, instrument};

use chirpy_core::entities::{NewUser, User};
use chirpy_core::value_objects::UserId;

use crate::dto::{CreateUserRequest, UpdateUserRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Account service
pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    /// Create a new AccountService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    ///
    /// # Errors
    /// `EmailAlreadyExists` if the email is taken
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: CreateUserRequest) -> ServiceResult<User> {
        let password_hash = self.ctx.passwords().hash(&request.password)?;

        let user = self
            .ctx
            .user_repo()
            .create(NewUser {
                email: request.email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User registered successfully");
        Ok(user)
    }

    /// Replace the email and password of an existing user
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn update_credentials(
        &self,
        user_id: UserId,
        request: UpdateUserRequest,
    ) -> ServiceResult<User> {
        let password_hash = self.ctx.passwords().hash(&request.password)?;

        let user = self
            .ctx
            .user_repo()
            .update_credentials(user_id, &request.email, &password_hash)
            .await?;

        info!(user_id = %user.id, "User credentials updated");
        Ok(user)
    }
}
