//! Business logic services
//!
//! Services borrow a [`ServiceContext`] and orchestrate repositories, the
//! refresh token store, and the access token codec.

pub mod account;
pub mod context;
pub mod error;
pub mod refresh_token;
pub mod session;

// Re-export all services for convenience
pub use account::AccountService;
pub use context::{default_access_token_ttl, ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use refresh_token::{default_refresh_token_ttl, RefreshTokenStore, REFRESH_TOKEN_BYTES};
pub use session::{Session, SessionService};
