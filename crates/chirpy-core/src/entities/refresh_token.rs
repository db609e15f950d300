//! Refresh token entity - long-lived opaque session credential
//!
//! A row is created on login and never mutated afterwards except for
//! `revoked_at`. Once revoked or past `expires_at` the token is dead for good,
//! but the row is kept for audit.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

use crate::value_objects::UserId;

/// Persisted refresh token
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken {
    /// 64-character hex string handed to the client
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Build a new, active token that expires `ttl` after `now`
    ///
    /// Returns `None` if `now + ttl` is not a representable instant.
    pub fn issue(
        token: String,
        user_id: UserId,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Option<Self> {
        let expires_at = now.checked_add_signed(ttl)?;
        Some(Self {
            token,
            user_id,
            created_at: now,
            expires_at,
            revoked_at: None,
        })
    }

    /// Check if token is revoked
    #[inline]
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Check if token is expired at the given instant
    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Usable iff not revoked and `now <= expires_at`
    #[inline]
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && !self.is_expired_at(now)
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.token.chars().take(8).collect();
        f.debug_struct("RefreshToken")
            .field("token", &format_args!("{prefix}…"))
            .field("user_id", &self.user_id)
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .field("revoked_at", &self.revoked_at)
            .finish()
    }
}
