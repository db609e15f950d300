//! Access token codec
//!
//! Short-lived HS256 JWTs carrying the user id as subject. Validation checks
//! signature, algorithm, and issuer through `jsonwebtoken`; expiry is checked
//! here against an explicit clock with zero leeway so that a token issued with
//! a non-positive lifetime is already expired.

use chirpy_core::UserId;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Fixed `iss` claim for every access token
pub const ACCESS_TOKEN_ISSUER: &str = "chirpy";

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer, always [`ACCESS_TOKEN_ISSUER`]
    pub iss: String,
    /// Subject (user ID in canonical UUID form)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    fn new(subject: UserId, now: DateTime<Utc>, ttl: Duration) -> Result<Self, AppError> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::lifetime_overflow("access token", ttl))?;

        Ok(Self {
            iss: ACCESS_TOKEN_ISSUER.to_string(),
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Parse the subject back into a user id
    ///
    /// # Errors
    /// Returns `AppError::BadSubject` if the subject is not a UUID
    pub fn user_id(&self) -> Result<UserId, AppError> {
        UserId::parse(&self.sub).map_err(|_| AppError::BadSubject)
    }

    /// Expired once `now` passes `exp`, or always if the token never had a
    /// positive lifetime
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= self.iat || now.timestamp() > self.exp
    }
}

/// Signs and validates access tokens with a shared HMAC secret
#[derive(Clone)]
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AccessTokenCodec {
    /// Create a codec for the given server secret
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // Expiry is checked by `Claims::is_expired_at` against the caller's clock
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_issuer(&[ACCESS_TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for `subject` valid for `ttl` from now
    ///
    /// # Errors
    /// Returns `AppError::Internal` if the expiry overflows or encoding fails
    pub fn issue(&self, subject: UserId, ttl: Duration) -> Result<String, AppError> {
        self.issue_at(subject, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    ///
    /// # Errors
    /// Returns `AppError::Internal` if the expiry overflows or encoding fails
    pub fn issue_at(
        &self,
        subject: UserId,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims::new(subject, now, ttl)?;

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode access token: {e}")))
    }

    /// Validate a token and return its subject
    ///
    /// # Errors
    /// Returns `BadSignature`, `MalformedToken`, `TokenExpired`, or `BadSubject`
    pub fn validate(&self, token: &str) -> Result<UserId, AppError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`
    ///
    /// # Errors
    /// Returns `BadSignature`, `MalformedToken`, `TokenExpired`, or `BadSubject`
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, AppError> {
        let claims = self.decode_claims(token)?;

        if claims.is_expired_at(now) {
            return Err(AppError::TokenExpired);
        }

        claims.user_id()
    }

    /// Verify signature, algorithm, and issuer and return the raw claims
    ///
    /// Does not check expiry.
    ///
    /// # Errors
    /// Returns `BadSignature` or `MalformedToken`
    pub fn decode_claims(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AppError::BadSignature,
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::MalformedToken,
            })
    }
}

impl std::fmt::Debug for AccessTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenCodec")
            .field("issuer", &ACCESS_TOKEN_ISSUER)
            .finish_non_exhaustive()
    }
}

/// Issue an access token for `subject` signed with `secret`
///
/// # Errors
/// Returns `AppError::Internal` if encoding fails
pub fn issue_access_token(subject: UserId, secret: &[u8], ttl: Duration) -> Result<String, AppError> {
    AccessTokenCodec::new(secret).issue(subject, ttl)
}

/// Validate an access token signed with `secret` and return its subject
///
/// # Errors
/// Returns `BadSignature`, `MalformedToken`, `TokenExpired`, or `BadSubject`
pub fn validate_access_token(token: &str, secret: &[u8]) -> Result<UserId, AppError> {
    AccessTokenCodec::new(secret).validate(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-key-that-is-long-enough";

    fn codec() -> AccessTokenCodec {
        AccessTokenCodec::new(SECRET)
    }

    #[test]
    fn test_issue_and_validate() {
        let user_id = UserId::generate();
        let token = issue_access_token(user_id, SECRET, Duration::hours(1)).unwrap();

        assert_eq!(token.split('.').count(), 3);
        assert_eq!(validate_access_token(&token, SECRET).unwrap(), user_id);
    }

    #[test]
    fn test_claims_shape() {
        let user_id = UserId::generate();
        let now = Utc::now();
        let token = codec().issue_at(user_id, Duration::seconds(3600), now).unwrap();

        let claims = codec().decode_claims(&token).unwrap();
        assert_eq!(claims.iss, "chirpy");
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 3600);
    }

    #[test]
    fn test_wrong_secret_is_bad_signature() {
        let token = codec().issue(UserId::generate(), Duration::hours(1)).unwrap();

        let result = validate_access_token(&token, b"wrong_secret");
        assert!(matches!(result, Err(AppError::BadSignature)));
    }

    #[test]
    fn test_wrong_secret_wins_over_expiry() {
        let now = Utc::now();
        let token = codec()
            .issue_at(UserId::generate(), Duration::hours(1), now - Duration::hours(5))
            .unwrap();

        let result = AccessTokenCodec::new(b"wrong_secret").validate_at(&token, now);
        assert!(matches!(result, Err(AppError::BadSignature)));
    }

    #[test]
    fn test_expired_token() {
        let now = Utc::now();
        let token = codec()
            .issue_at(UserId::generate(), Duration::hours(1), now - Duration::hours(2))
            .unwrap();

        let result = codec().validate_at(&token, now);
        assert!(matches!(result, Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_valid_up_to_exp() {
        let now = Utc::now();
        let user_id = UserId::generate();
        let token = codec().issue_at(user_id, Duration::seconds(10), now).unwrap();

        assert_eq!(
            codec().validate_at(&token, now + Duration::seconds(10)).unwrap(),
            user_id
        );
        assert!(matches!(
            codec().validate_at(&token, now + Duration::seconds(11)),
            Err(AppError::TokenExpired)
        ));
    }

    #[test]
    fn test_non_positive_ttl_is_expired() {
        let user_id = UserId::generate();

        let zero = codec().issue(user_id, Duration::zero()).unwrap();
        assert!(matches!(codec().validate(&zero), Err(AppError::TokenExpired)));

        let negative = codec().issue(user_id, Duration::seconds(-30)).unwrap();
        assert!(matches!(
            codec().validate(&negative),
            Err(AppError::TokenExpired)
        ));
    }

    #[test]
    fn test_overflowing_ttl_is_an_error() {
        let user_id = UserId::generate();

        let result = codec().issue(user_id, Duration::days(365 * 1_000_000));
        assert!(matches!(result, Err(AppError::Internal(_))));

        let result = codec().issue(user_id, Duration::MAX);
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn test_malformed_tokens() {
        for token in ["", "invalid", "invalid.token.here", "a.b"] {
            let result = codec().validate(token);
            assert!(
                matches!(result, Err(AppError::MalformedToken)),
                "token {token:?} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_tampered_payload_is_bad_signature() {
        let codec = codec();
        let token = codec.issue(UserId::generate(), Duration::hours(1)).unwrap();
        let other = codec.issue(UserId::generate(), Duration::hours(1)).unwrap();

        // Splice the payload of `other` onto the header and signature of `token`
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert!(matches!(
            codec.validate(&forged),
            Err(AppError::BadSignature)
        ));
    }

    #[test]
    fn test_wrong_issuer_is_malformed() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: "someone-else".to_string(),
            sub: UserId::generate().to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(
            codec().validate(&token),
            Err(AppError::MalformedToken)
        ));
    }

    #[test]
    fn test_wrong_algorithm_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: ACCESS_TOKEN_ISSUER.to_string(),
            sub: UserId::generate().to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(
            codec().validate(&token),
            Err(AppError::MalformedToken)
        ));
    }

    #[test]
    fn test_non_uuid_subject_is_bad_subject() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: ACCESS_TOKEN_ISSUER.to_string(),
            sub: "12345".to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(codec().validate(&token), Err(AppError::BadSubject)));
    }

    #[test]
    fn test_claims_user_id() {
        let id = uuid::Uuid::new_v4();
        let claims = Claims {
            iss: ACCESS_TOKEN_ISSUER.to_string(),
            sub: id.to_string(),
            iat: 0,
            exp: i64::MAX,
        };

        assert_eq!(claims.user_id().unwrap(), UserId::from_uuid(id));
    }
}
