//! Authentication primitives
//!
//! - [`password`]: Argon2id credential hashing and verification
//! - [`header`]: `Authorization` header parsing
//! - [`jwt`]: signed access token issue/validate
//! - [`crypto`]: constant-time comparison helpers

mod crypto;
mod header;
mod jwt;
mod password;

pub use crypto::{constant_time_eq, constant_time_str_eq};
pub use header::{
    extract_api_key, extract_bearer, verify_api_key, Credential, API_KEY_SCHEME, BEARER_SCHEME,
};
pub use jwt::{
    issue_access_token, validate_access_token, AccessTokenCodec, Claims, ACCESS_TOKEN_ISSUER,
};
pub use password::{hash_password, verify_password, PasswordService};
