//! Application error types
//!
//! Unified error handling for the authentication subsystem. Several variants
//! are deliberately coarse: `InvalidCredentials` covers both an unknown email
//! and a wrong password, and `InvalidToken` covers a refresh token that is
//! unknown, expired, or revoked. Callers must not refine these.

use chirpy_core::DomainError;
use chrono::Duration;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authorization header errors
    #[error("Missing authorization header")]
    MissingHeader,

    #[error("Malformed authorization header")]
    MalformedHeader,

    // Authentication errors
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid API key")]
    InvalidApiKey,

    // Access token errors
    #[error("Token expired")]
    TokenExpired,

    #[error("Token signature mismatch")]
    BadSignature,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token subject is not a valid user id")]
    BadSubject,

    // Credential and randomness errors
    #[error("Password hashing failed: {0}")]
    PasswordHashing(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("Secure random source unavailable: {0}")]
    EntropyUnavailable(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 401 Unauthorized
            Self::MissingHeader
            | Self::MalformedHeader
            | Self::InvalidCredentials
            | Self::InvalidToken
            | Self::InvalidApiKey
            | Self::TokenExpired
            | Self::BadSignature
            | Self::MalformedToken
            | Self::BadSubject => 401,

            // 500 Internal Server Error
            Self::PasswordHashing(_)
            | Self::MalformedHash(_)
            | Self::EntropyUnavailable(_)
            | Self::Database(_)
            | Self::Internal(_)
            | Self::Config(_) => 500,

            Self::Domain(e) => Self::domain_status(e),
        }
    }

    /// HTTP status for a repository or domain rule failure
    #[must_use]
    pub fn domain_status(err: &DomainError) -> u16 {
        if err.is_not_found() {
            404
        } else if err.is_conflict() {
            409
        } else {
            500
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingHeader => "MISSING_AUTHORIZATION",
            Self::MalformedHeader => "MALFORMED_AUTHORIZATION",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidApiKey => "INVALID_API_KEY",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::BadSignature => "BAD_SIGNATURE",
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::BadSubject => "BAD_SUBJECT",
            Self::PasswordHashing(_) => "PASSWORD_HASHING_ERROR",
            Self::MalformedHash(_) => "MALFORMED_PASSWORD_HASH",
            Self::EntropyUnavailable(_) => "ENTROPY_UNAVAILABLE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if this error rejects an access token
    #[must_use]
    pub fn is_access_token_error(&self) -> bool {
        matches!(
            self,
            Self::TokenExpired | Self::BadSignature | Self::MalformedToken | Self::BadSubject
        )
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        let status = self.status_code();
        (400..500).contains(&status)
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        let status = self.status_code();
        (500..600).contains(&status)
    }

    /// A token lifetime that pushes its expiry past the representable range
    #[must_use]
    pub fn lifetime_overflow(what: &str, ttl: Duration) -> Self {
        Self::Internal(anyhow::anyhow!("{what} lifetime {ttl} overflows the clock"))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
