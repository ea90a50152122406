//! Authentication module
//!
//! Provides JWT-based authentication with bcrypt password hashing.

mod jwt;
mod middleware;
mod password;

pub use jwt::{humanize_ttl, AccessToken, Claims, JwtKeys, JwtService, TokenError, TokenKind};
pub use middleware::{auth_middleware, authenticate, AuthUser};
pub use password::{PasswordError, PasswordService};
