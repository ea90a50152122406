//! User repository for database operations

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use vaultshop_shared::models::User;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            name: record.name,
            email: record.email,
        }
    }
}

/// Input for creating a user; holds the hash, never the plaintext
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Insert a user unless the email is already registered
    ///
    /// Returns `None` when the email is taken. The unique index on `email`
    /// makes this safe against concurrent registrations.
    pub async fn create_if_absent(pool: &PgPool, user: NewUser) -> Result<Option<UserRecord>> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Find user by email (exact, case-sensitive match)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}

/// Persistence used by the authentication flow
///
/// Implemented for `PgPool`; tests substitute an in-memory store.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    /// `None` means the email is already registered
    async fn create_if_absent(&self, user: NewUser) -> Result<Option<UserRecord>>;
}

#[async_trait]
impl CredentialStore for PgPool {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        UserRepository::find_by_email(self, email).await
    }

    async fn create_if_absent(&self, user: NewUser) -> Result<Option<UserRecord>> {
        UserRepository::create_if_absent(self, user).await
    }
}
