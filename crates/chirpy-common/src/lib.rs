//! # chirpy-common
//!
//! Shared utilities including configuration, error handling, authentication
//! primitives, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    constant_time_eq, constant_time_str_eq, extract_api_key, extract_bearer, hash_password,
    issue_access_token, validate_access_token, verify_api_key, verify_password, AccessTokenCodec,
    Claims, Credential, PasswordService, ACCESS_TOKEN_ISSUER,
};
pub use config::{
    AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment, JwtConfig, ServerConfig,
    WebhookConfig, MAX_TOKEN_TTL_SECS,
};
pub use error::{AppError, AppResult};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
