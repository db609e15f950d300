//! Password hashing and verification utilities
//!
//! Uses Argon2id with a fresh random salt per hash. The stored form is the
//! PHC string, which carries algorithm, parameters, and salt, so verification
//! never needs out-of-band configuration.

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PhcError, PasswordHash as PhcHash, PasswordHasher,
        PasswordVerifier, SaltString,
    },
    Argon2,
};
use chirpy_core::PasswordHash;

use crate::error::AppError;

/// Hash a password using Argon2id
///
/// Any string is accepted, including the empty string. Two calls with the same
/// input produce different outputs.
///
/// # Errors
/// Returns `AppError::PasswordHashing` if the hasher fails
pub fn hash_password(password: &str) -> Result<PasswordHash, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| PasswordHash::new(hash.to_string()))
        .map_err(|e| AppError::PasswordHashing(e.to_string()))
}

/// Verify a password against a stored hash
///
/// A mismatch is `Ok(false)`, never an error.
///
/// # Errors
/// Returns `AppError::MalformedHash` if the stored value is not a valid PHC string
pub fn verify_password(password: &str, hash: &PasswordHash) -> Result<bool, AppError> {
    let parsed_hash =
        PhcHash::new(hash.expose()).map_err(|e| AppError::MalformedHash(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(PhcError::Password) => Ok(false),
        Err(e) => Err(AppError::MalformedHash(e.to_string())),
    }
}

/// Password service for dependency injection
#[derive(Debug, Clone, Default)]
pub struct PasswordService;

impl PasswordService {
    /// Create a new password service
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Hash a password
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn hash(&self, password: &str) -> Result<PasswordHash, AppError> {
        hash_password(password)
    }

    /// Verify a password against a hash
    ///
    /// # Errors
    /// Returns an error if the stored hash is malformed
    pub fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, AppError> {
        verify_password(password, hash)
    }
}
