//! Bank account service
//!
//! All operations act on behalf of the authenticated user, identified by the
//! email carried in the access token.

use crate::error::ApiError;
use crate::repositories::{
    BankAccountDetails, BankAccountRepository, Deposit, UserRepository, Write,
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use vaultshop_shared::models::BankAccount;
use vaultshop_shared::types::{BankAccountRequest, PageMeta, Pagination};
use vaultshop_shared::validation::{validate_account_no, validate_amount, validate_required};

fn not_found() -> ApiError {
    ApiError::NotFound("Bank not found".to_string())
}

fn duplicate() -> ApiError {
    ApiError::Conflict("Account number already in use".to_string())
}

/// Parse a path id; malformed ids are reported like missing accounts
pub fn parse_bank_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| not_found())
}

/// Validate and trim account details from a request body
pub fn account_details(req: BankAccountRequest) -> Result<BankAccountDetails, ApiError> {
    validate_required("Bank name", &req.bank_name).map_err(ApiError::BadRequest)?;
    validate_account_no(&req.account_no).map_err(ApiError::BadRequest)?;

    Ok(BankAccountDetails {
        bank_name: req.bank_name.trim().to_string(),
        account_no: req.account_no.trim().to_string(),
    })
}

/// Bank account service
pub struct BankService;

impl BankService {
    async fn owner_id(pool: &PgPool, email: &str) -> Result<Uuid, ApiError> {
        UserRepository::find_by_email(pool, email)
            .await?
            .map(|user| user.id)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Open an account with a zero balance
    pub async fn add(
        pool: &PgPool,
        email: &str,
        req: BankAccountRequest,
    ) -> Result<BankAccount, ApiError> {
        let user_id = Self::owner_id(pool, email).await?;
        let details = account_details(req)?;

        match BankAccountRepository::create(pool, user_id, details).await? {
            Write::Done(record) => {
                info!(bank_id = %record.id, user_id = %user_id, "Bank account added");
                Ok(record.into())
            }
            Write::Duplicate => Err(duplicate()),
            Write::NotFound => Err(not_found()),
        }
    }

    pub async fn list(
        pool: &PgPool,
        email: &str,
        page: &Pagination,
    ) -> Result<(Vec<BankAccount>, PageMeta), ApiError> {
        let user_id = Self::owner_id(pool, email).await?;
        let records = BankAccountRepository::list_for_user(pool, user_id, page).await?;
        let total = BankAccountRepository::count_for_user(pool, user_id, page).await?;

        Ok((
            records.into_iter().map(BankAccount::from).collect(),
            PageMeta::new(page, total),
        ))
    }

    pub async fn update(
        pool: &PgPool,
        email: &str,
        id: Uuid,
        req: BankAccountRequest,
    ) -> Result<BankAccount, ApiError> {
        let user_id = Self::owner_id(pool, email).await?;
        let details = account_details(req)?;

        match BankAccountRepository::update(pool, id, user_id, details).await? {
            Write::Done(record) => Ok(record.into()),
            Write::NotFound => Err(not_found()),
            Write::Duplicate => Err(duplicate()),
        }
    }

    pub async fn delete(pool: &PgPool, email: &str, id: Uuid) -> Result<(), ApiError> {
        let user_id = Self::owner_id(pool, email).await?;
        if !BankAccountRepository::soft_delete(pool, id, user_id).await? {
            return Err(not_found());
        }
        info!(bank_id = %id, user_id = %user_id, "Bank account deleted");
        Ok(())
    }

    /// Add a positive amount to the balance
    pub async fn add_money(
        pool: &PgPool,
        email: &str,
        id: Uuid,
        amount: Decimal,
    ) -> Result<BankAccount, ApiError> {
        validate_amount(amount).map_err(ApiError::BadRequest)?;
        let user_id = Self::owner_id(pool, email).await?;

        match BankAccountRepository::deposit(pool, id, user_id, amount).await? {
            Deposit::Applied(record) => {
                info!(bank_id = %id, "Deposit applied");
                Ok(record.into())
            }
            Deposit::NotFound => Err(not_found()),
            Deposit::Overflow => Err(ApiError::BadRequest(
                "Balance would exceed the maximum allowed".to_string(),
            )),
        }
    }
}
