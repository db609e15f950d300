//! Service layer error type
//!
//! Either a repository failure passed through from `chirpy-core`, an auth or
//! crypto failure from `chirpy-common`, or a context that could not be built.

use chirpy_common::AppError;
use chirpy_core::DomainError;
use std::fmt;

#[derive(Debug)]
pub enum ServiceError {
    /// Repository or domain rule failure
    Domain(DomainError),

    /// Header, token, credential, or randomness failure
    App(AppError),

    /// `ServiceContextBuilder` was missing a dependency
    Validation(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::Validation(msg) => write!(f, "Invalid service context: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// The generic login failure, whatever the underlying cause
    pub fn invalid_credentials() -> Self {
        Self::App(AppError::InvalidCredentials)
    }

    /// The generic refresh/revoke failure, whatever the underlying cause
    pub fn invalid_token() -> Self {
        Self::App(AppError::InvalidToken)
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => AppError::domain_status(e),
            Self::App(e) => e.status_code(),
            Self::Validation(_) => 500,
        }
    }

    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Validation(_) => "INVALID_SERVICE_CONTEXT",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
