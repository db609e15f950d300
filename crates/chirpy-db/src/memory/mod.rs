//! In-memory repositories
//!
//! DashMap-backed implementations of the chirpy-core repository traits with the
//! same observable semantics as the PostgreSQL ones. Used by tests and for
//! running the service without a database.

mod refresh_token;
mod user;

pub use refresh_token::InMemoryRefreshTokenRepository;
pub use user::InMemoryUserRepository;
