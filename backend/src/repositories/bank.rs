//! Bank account repository for database operations
//!
//! Mutations are scoped by owner: an account belonging to someone else is
//! indistinguishable from a missing one.

use super::Write;
use crate::db::{is_numeric_overflow, is_unique_violation};
use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use vaultshop_shared::models::BankAccount;
use vaultshop_shared::types::Pagination;

/// Bank account record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BankAccountRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bank_name: String,
    pub account_no: String,
    pub nominal: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BankAccountRecord> for BankAccount {
    fn from(record: BankAccountRecord) -> Self {
        BankAccount {
            id: record.id,
            user_id: record.user_id,
            bank_name: record.bank_name,
            account_no: record.account_no,
            nominal: record.nominal,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Input for creating or renaming a bank account
#[derive(Debug, Clone)]
pub struct BankAccountDetails {
    pub bank_name: String,
    pub account_no: String,
}

/// Outcome of a deposit
#[derive(Debug, Clone)]
pub enum Deposit {
    Applied(BankAccountRecord),
    NotFound,
    /// The new balance would not fit the column
    Overflow,
}

/// Bank account repository for database operations
pub struct BankAccountRepository;

impl BankAccountRepository {
    /// Open an account with a zero balance
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        details: BankAccountDetails,
    ) -> Result<Write<BankAccountRecord>> {
        let record = sqlx::query_as::<_, BankAccountRecord>(
            r#"
            INSERT INTO bank_accounts (id, user_id, bank_name, account_no, nominal)
            VALUES ($1, $2, $3, $4, 0)
            ON CONFLICT (account_no) DO NOTHING
            RETURNING id, user_id, bank_name, account_no, nominal, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&details.bank_name)
        .bind(&details.account_no)
        .fetch_optional(pool)
        .await?;

        Ok(record.map_or(Write::Duplicate, Write::Done))
    }

    /// One page of the user's accounts, searching bank name and account number
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
        page: &Pagination,
    ) -> Result<Vec<BankAccountRecord>> {
        let records = sqlx::query_as::<_, BankAccountRecord>(
            r#"
            SELECT id, user_id, bank_name, account_no, nominal, created_at, updated_at
            FROM bank_accounts
            WHERE user_id = $1 AND deleted_at IS NULL
              AND ($2::TEXT IS NULL OR LOWER(bank_name) LIKE $2 OR account_no LIKE $2)
            ORDER BY created_at DESC, id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(page.like_pattern())
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Number of the user's accounts matching the same filter as [`Self::list_for_user`]
    pub async fn count_for_user(pool: &PgPool, user_id: Uuid, page: &Pagination) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM bank_accounts
            WHERE user_id = $1 AND deleted_at IS NULL
              AND ($2::TEXT IS NULL OR LOWER(bank_name) LIKE $2 OR account_no LIKE $2)
            "#,
        )
        .bind(user_id)
        .bind(page.like_pattern())
        .fetch_one(pool)
        .await?;

        Ok(total)
    }

    /// Replace bank name and account number
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        details: BankAccountDetails,
    ) -> Result<Write<BankAccountRecord>> {
        let result = sqlx::query_as::<_, BankAccountRecord>(
            r#"
            UPDATE bank_accounts SET
                bank_name = $3,
                account_no = $4,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            RETURNING id, user_id, bank_name, account_no, nominal, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&details.bank_name)
        .bind(&details.account_no)
        .fetch_optional(pool)
        .await;

        match result {
            Ok(Some(record)) => Ok(Write::Done(record)),
            Ok(None) => Ok(Write::NotFound),
            Err(e) if is_unique_violation(&e) => Ok(Write::Duplicate),
            Err(e) => Err(e.into()),
        }
    }

    /// Add `amount` to the balance in a single statement
    pub async fn deposit(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        amount: Decimal,
    ) -> Result<Deposit> {
        let result = sqlx::query_as::<_, BankAccountRecord>(
            r#"
            UPDATE bank_accounts SET
                nominal = nominal + $3,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            RETURNING id, user_id, bank_name, account_no, nominal, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(amount)
        .fetch_optional(pool)
        .await;

        match result {
            Ok(Some(record)) => Ok(Deposit::Applied(record)),
            Ok(None) => Ok(Deposit::NotFound),
            Err(e) if is_numeric_overflow(&e) => Ok(Deposit::Overflow),
            Err(e) => Err(e.into()),
        }
    }

    /// Soft delete; `false` if the account does not exist for this user
    pub async fn soft_delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE bank_accounts SET deleted_at = NOW()
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
