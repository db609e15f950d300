//! Repository traits

mod repositories;

pub use repositories::{RefreshTokenRepository, RepoResult, UserRepository};
