//! Vaultshop Shared Library
//!
//! Request/response types, public models and validation helpers shared by
//! the backend and its API clients.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{BankAccount, Product, User};
pub use types::*;
