//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in chirpy-core.

mod error;
mod refresh_token;
mod user;

pub use refresh_token::PgRefreshTokenRepository;
pub use user::PgUserRepository;
