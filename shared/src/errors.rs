//! Error types shared between the backend and its clients

use thiserror::Error;

/// Authentication failure kinds
///
/// These stay distinct internally so they can be logged, but every variant is
/// rendered to the caller as the same 401 response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Missing token")]
    MissingToken,

    #[error("Invalid authorization format")]
    InvalidScheme,
}

impl AuthError {
    /// Message shown to the caller
    ///
    /// Token failures collapse into one message so a client cannot tell an
    /// expired token from a forged one.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Invalid credentials",
            AuthError::MissingToken => "Unauthorized",
            AuthError::TokenExpired | AuthError::InvalidToken | AuthError::InvalidScheme => {
                "Invalid token"
            }
        }
    }
}
