//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod bank;
pub mod product;
pub mod user;

pub use bank::{BankAccountDetails, BankAccountRecord, BankAccountRepository, Deposit};
pub use product::{NewProduct, ProductChanges, ProductRecord, ProductRepository};
pub use user::{CredentialStore, NewUser, UserRecord, UserRepository};

/// Outcome of a write that can hit a uniqueness constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write<T> {
    Done(T),
    NotFound,
    Duplicate,
}
