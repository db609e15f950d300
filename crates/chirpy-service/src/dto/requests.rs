//! Request DTOs for API endpoints
//!
//! Password fields are redacted from `Debug` output.

use serde::Deserialize;
use std::fmt;

fn redacted(f: &mut fmt::Formatter<'_>, name: &str, email: &str) -> fmt::Result {
    f.debug_struct(name)
        .field("email", &email)
        .field("password", &"<redacted>")
        .finish()
}

/// Account registration request
#[derive(Clone, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        redacted(f, "CreateUserRequest", &self.email)
    }
}

/// Login request
#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        redacted(f, "LoginRequest", &self.email)
    }
}

/// Replace email and password of the authenticated user
#[derive(Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for UpdateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        redacted(f, "UpdateUserRequest", &self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_deserialize() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":"04234"}"#).unwrap();
        assert_eq!(request.email, "a@x.com");
        assert_eq!(request.password, "04234");
    }

    #[test]
    fn test_debug_redacts_password() {
        let request = CreateUserRequest {
            email: "a@x.com".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{request:?}");
        assert!(debug.contains("a@x.com"));
        assert!(!debug.contains("hunter2"));
    }
}
