//! Domain entities - core business objects

mod refresh_token;
mod user;

pub use refresh_token::RefreshToken;
pub use user::{NewUser, PasswordHash, User};
