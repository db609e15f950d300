//! Response DTOs for API endpoints

use chirpy_core::value_objects::UserId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// User as returned to its owner; never carries the password hash
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub is_chirpy_red: bool,
}

/// Successful login: the user plus a fresh token pair
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    /// Signed access token
    pub token: String,
    /// Opaque 64-character refresh token
    pub refresh_token: String,
}

/// Successful refresh: a new access token only
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_is_flat() {
        let now = Utc::now();
        let response = LoginResponse {
            user: UserResponse {
                id: UserId::generate(),
                created_at: now,
                updated_at: now,
                email: "a@x.com".to_string(),
                is_chirpy_red: false,
            },
            token: "jwt".to_string(),
            refresh_token: "ab".repeat(32),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["is_chirpy_red"], false);
        assert_eq!(json["token"], "jwt");
        assert!(json.get("user").is_none());
        assert!(json.get("hashed_password").is_none());
    }
}
