//! # chirpy-core
//!
//! Domain layer containing entities, value objects, and repository traits for the
//! authentication and session subsystem.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{NewUser, PasswordHash, RefreshToken, User};
pub use error::DomainError;
pub use traits::{RefreshTokenRepository, RepoResult, UserRepository};
pub use value_objects::{UserId, UserIdParseError};
