//! User entity - represents a Chirpy account

use chrono::{DateTime, Utc};
use std::fmt;

use crate::value_objects::UserId;

/// Stored output of the password hasher (PHC string format)
///
/// Deliberately not `Serialize` and not `PartialEq`: the hash must never reach a
/// client and must only be checked through the password verifier.
#[derive(Clone)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a PHC-formatted hash string
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Borrow the raw PHC string (for persistence and verification only)
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// User entity as owned by the user-record store
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: PasswordHash,
    /// Paid "Chirpy Red" membership
    pub is_chirpy_red: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with a fresh ID
    pub fn new(email: String, password_hash: PasswordHash) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::generate(),
            email,
            password_hash,
            is_chirpy_red: false,
            created_at: now,
            updated_at: now,
        }
    }

}

/// Data needed to insert a user row
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: PasswordHash,
}

impl From<NewUser> for User {
    fn from(new: NewUser) -> Self {
        User::new(new.email, new.password_hash)
    }
}
