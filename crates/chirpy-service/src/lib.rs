//! # chirpy-service
//!
//! Application layer containing the session and account use cases and their DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    CreateUserRequest, LoginRequest, LoginResponse, RefreshResponse, UpdateUserRequest,
    UserResponse,
};
pub use services::{
    AccountService, RefreshTokenStore, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, Session, SessionService,
};
