//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the auth primitives.

pub mod bank;
pub mod product;
pub mod user;

pub use bank::BankService;
pub use product::ProductService;
pub use user::UserService;
