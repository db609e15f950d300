//! `Authorization` header parsing
//!
//! The header value is split on whitespace (runs of separators collapse), the
//! first field is the scheme and is matched case-insensitively, and the second
//! field is returned verbatim. Any trailing fields are ignored.

use http::{header::AUTHORIZATION, HeaderMap};
use std::fmt;

use super::crypto::constant_time_str_eq;
use crate::error::AppError;

/// Scheme for user session credentials
pub const BEARER_SCHEME: &str = "Bearer";

/// Scheme for the payment provider's webhook key
pub const API_KEY_SCHEME: &str = "ApiKey";

/// Request-scoped credential taken from the `Authorization` header
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Bearer(String),
    ApiKey(String),
}

impl Credential {
    /// Parse whichever supported scheme the header carries
    ///
    /// # Errors
    /// Returns `MissingHeader` or `MalformedHeader`
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        let (scheme, value) = split_authorization(headers)?;

        if scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
            Ok(Self::Bearer(value.to_string()))
        } else if scheme.eq_ignore_ascii_case(API_KEY_SCHEME) {
            Ok(Self::ApiKey(value.to_string()))
        } else {
            Err(AppError::MalformedHeader)
        }
    }

    /// The credential string without its scheme
    #[must_use]
    pub fn secret(&self) -> &str {
        match self {
            Self::Bearer(value) | Self::ApiKey(value) => value,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer(<redacted>)"),
            Self::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
        }
    }
}

/// Extract the token from `Authorization: Bearer <token>`
///
/// # Errors
/// Returns `MissingHeader` if absent or empty, `MalformedHeader` otherwise
pub fn extract_bearer(headers: &HeaderMap) -> Result<String, AppError> {
    extract_scheme(headers, BEARER_SCHEME)
}

/// Extract the key from `Authorization: ApiKey <key>`
///
/// # Errors
/// Returns `MissingHeader` if absent or empty, `MalformedHeader` otherwise
pub fn extract_api_key(headers: &HeaderMap) -> Result<String, AppError> {
    extract_scheme(headers, API_KEY_SCHEME)
}

/// Check the request's API key against the configured one
///
/// # Errors
/// Returns header errors from [`extract_api_key`], or `InvalidApiKey` on mismatch
pub fn verify_api_key(headers: &HeaderMap, expected: &str) -> Result<(), AppError> {
    let key = extract_api_key(headers)?;

    if constant_time_str_eq(&key, expected) {
        Ok(())
    } else {
        Err(AppError::InvalidApiKey)
    }
}

fn extract_scheme(headers: &HeaderMap, scheme: &str) -> Result<String, AppError> {
    let (found, value) = split_authorization(headers)?;

    if found.eq_ignore_ascii_case(scheme) {
        Ok(value.to_string())
    } else {
        Err(AppError::MalformedHeader)
    }
}

fn split_authorization(headers: &HeaderMap) -> Result<(&str, &str), AppError> {
    let raw = headers.get(AUTHORIZATION).ok_or(AppError::MissingHeader)?;
    if raw.is_empty() {
        return Err(AppError::MissingHeader);
    }

    let value = raw.to_str().map_err(|_| AppError::MalformedHeader)?;
    let mut fields = value.split_whitespace();

    match (fields.next(), fields.next()) {
        (Some(scheme), Some(credential)) => Ok((scheme, credential)),
        _ => Err(AppError::MalformedHeader),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(&headers("Bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        assert_eq!(extract_bearer(&headers("bearer abc")).unwrap(), "abc");
        assert_eq!(extract_bearer(&headers("BEARER abc")).unwrap(), "abc");
        assert_eq!(extract_api_key(&headers("apikey k")).unwrap(), "k");
    }

    #[test]
    fn test_repeated_separators_are_tolerated() {
        assert_eq!(extract_bearer(&headers("Bearer    abc")).unwrap(), "abc");
        assert_eq!(extract_bearer(&headers("  Bearer\tabc  ")).unwrap(), "abc");
    }

    #[test]
    fn test_token_returned_verbatim() {
        assert_eq!(
            extract_bearer(&headers("Bearer aB.cD-eF_gH")).unwrap(),
            "aB.cD-eF_gH"
        );
        assert_eq!(extract_bearer(&headers("Bearer abc extra")).unwrap(), "abc");
    }

    #[test]
    fn test_missing_header() {
        let result = extract_bearer(&HeaderMap::new());
        assert!(matches!(result, Err(AppError::MissingHeader)));

        let result = extract_bearer(&headers(""));
        assert!(matches!(result, Err(AppError::MissingHeader)));
    }

    #[test]
    fn test_malformed_header() {
        for value in ["Bearer", "Bearer ", "abc", "   ", "Basic abc", "ApiKey abc"] {
            let result = extract_bearer(&headers(value));
            assert!(
                matches!(result, Err(AppError::MalformedHeader)),
                "header {value:?} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_api_key_rejects_bearer_scheme() {
        let result = extract_api_key(&headers("Bearer abc"));
        assert!(matches!(result, Err(AppError::MalformedHeader)));
    }

    #[test]
    fn test_credential_from_headers() {
        assert_eq!(
            Credential::from_headers(&headers("Bearer t")).unwrap(),
            Credential::Bearer("t".to_string())
        );
        assert_eq!(
            Credential::from_headers(&headers("ApiKey k")).unwrap(),
            Credential::ApiKey("k".to_string())
        );
        assert!(matches!(
            Credential::from_headers(&headers("Basic x")),
            Err(AppError::MalformedHeader)
        ));
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::Bearer("secret-token".to_string());
        assert!(!format!("{credential:?}").contains("secret-token"));
        assert_eq!(credential.secret(), "secret-token");
    }

    #[test]
    fn test_verify_api_key() {
        assert!(verify_api_key(&headers("ApiKey f271c81f"), "f271c81f").is_ok());
        assert!(matches!(
            verify_api_key(&headers("ApiKey nope"), "f271c81f"),
            Err(AppError::InvalidApiKey)
        ));
        assert!(matches!(
            verify_api_key(&HeaderMap::new(), "f271c81f"),
            Err(AppError::MissingHeader)
        ));
    }
}
