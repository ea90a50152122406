//! Password hashing using bcrypt
//!
//! Provides salted hashing and verification.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive (cost 14 takes around a second).
//! Request handlers must use the `_async` variants, which run the work on
//! the blocking thread pool so the async runtime keeps serving other requests.

use thiserror::Error;

/// Password hashing failure
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Password hashing service
///
/// Holds only the bcrypt cost factor, so it is `Copy` and can be moved into
/// blocking tasks freely.
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password (blocking operation)
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// Hash a password on the blocking thread pool
    pub async fn hash_async(&self, password: String) -> Result<String, PasswordError> {
        let service = *self;
        tokio::task::spawn_blocking(move || service.hash(&password)).await?
    }

    /// Verify a password against a hash (blocking operation)
    ///
    /// A malformed hash is reported as an error, a wrong password as `Ok(false)`.
    /// Callers at the HTTP boundary treat both as invalid credentials.
    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        Ok(bcrypt::verify(password, hash)?)
    }

    /// Verify a password on the blocking thread pool
    pub async fn verify_async(password: String, hash: String) -> Result<bool, PasswordError> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash)).await?
    }
}
