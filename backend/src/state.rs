//! Application state management
//!
//! Shared state passed to all request handlers via Axum's state extraction.
//! Everything here is built once at startup and read-only afterwards.

use crate::auth::{JwtService, PasswordService};
use crate::config::AppConfig;
use anyhow::Result;
use sqlx::PgPool;

/// Shared application state
///
/// - `db`: PgPool is internally Arc'd, cloning is O(1)
/// - `jwt`: Pre-computed keys wrapped in Arc, cloning is O(1)
/// - `passwords`: just the bcrypt cost
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Token issuer and verifier
    pub jwt: JwtService,
    /// Password hasher
    pub passwords: PasswordService,
}

impl AppState {
    /// Create a new application state
    ///
    /// Derives both signing keys and the hashing cost from the config. Fails
    /// if either secret is unusable, which must abort startup.
    pub fn new(db: PgPool, config: AppConfig) -> Result<Self> {
        let jwt = JwtService::new(&config.jwt)?;
        let passwords = PasswordService::new(config.password.bcrypt_cost);

        Ok(Self { db, jwt, passwords })
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    #[inline]
    pub fn passwords(&self) -> PasswordService {
        self.passwords
    }
}
