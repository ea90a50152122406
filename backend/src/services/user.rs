//! User service for registration, login and token exchange
//!
//! Wrong password, unknown email, corrupt stored hash and a failed store
//! lookup all surface as the same "Invalid credentials" response. The
//! distinct cause is only logged.

use crate::auth::{AccessToken, JwtService, PasswordError, PasswordService};
use crate::error::ApiError;
use crate::repositories::{CredentialStore, NewUser, UserRecord};
use tracing::{debug, info, warn};
use vaultshop_shared::errors::AuthError;
use vaultshop_shared::models::User;
use vaultshop_shared::types::LoginResponse;
use vaultshop_shared::validation::{validate_email, validate_password};

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user
    ///
    /// Password hashing is offloaded to the blocking thread pool.
    pub async fn register<S>(
        store: &S,
        passwords: PasswordService,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, ApiError>
    where
        S: CredentialStore + ?Sized,
    {
        if name.trim().is_empty() || email.is_empty() || password.is_empty() {
            return Err(ApiError::BadRequest("All fields are required".to_string()));
        }
        validate_email(email).map_err(ApiError::BadRequest)?;
        validate_password(password).map_err(ApiError::BadRequest)?;

        // Cheap pre-check so a duplicate does not pay for a bcrypt round
        if store.find_by_email(email).await?.is_some() {
            return Err(ApiError::Conflict("Email already in use".to_string()));
        }

        let password_hash = passwords.hash_async(password.to_string()).await?;

        let user = store
            .create_if_absent(NewUser {
                name: name.trim().to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?
            .ok_or_else(|| ApiError::Conflict("Email already in use".to_string()))?;

        info!(user_id = %user.id, "User registered");
        Ok(user.into())
    }

    /// Login with email and password
    ///
    /// Password verification is offloaded to the blocking thread pool.
    pub async fn login<S>(
        store: &S,
        jwt: &JwtService,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError>
    where
        S: CredentialStore + ?Sized,
    {
        let user = match store.find_by_email(email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!("Login for unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => {
                warn!(error = %e, "Credential lookup failed during login");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        match PasswordService::verify_async(password.to_string(), user.password_hash.clone()).await
        {
            Ok(true) => {}
            Ok(false) => {
                debug!(user_id = %user.id, "Login with wrong password");
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e @ PasswordError::Hashing(_)) => {
                warn!(user_id = %user.id, error = %e, "Stored password hash is unusable");
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e @ PasswordError::Join(_)) => {
                warn!(user_id = %user.id, error = %e, "Password verification did not complete");
                return Err(AuthError::InvalidCredentials.into());
            }
        }

        let response = Self::issue_tokens(jwt, user)?;
        info!(user_id = %response.user.id, "User logged in");
        Ok(response)
    }

    /// Exchange a refresh token for a new access/refresh pair
    ///
    /// The presented refresh token is not revoked; it stays valid until it
    /// expires on its own.
    pub async fn refresh<S>(
        store: &S,
        jwt: &JwtService,
        refresh_token: &str,
    ) -> Result<LoginResponse, ApiError>
    where
        S: CredentialStore + ?Sized,
    {
        let claims = jwt.verify_refresh_token(refresh_token).map_err(|e| {
            debug!(reason = %e, "Rejected refresh token");
            AuthError::InvalidToken
        })?;

        let user = store
            .find_by_email(&claims.email)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        Self::issue_tokens(jwt, user)
    }

    /// Public profile of the authenticated user
    pub async fn get_profile<S>(store: &S, email: &str) -> Result<User, ApiError>
    where
        S: CredentialStore + ?Sized,
    {
        store
            .find_by_email(email)
            .await?
            .map(User::from)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    fn issue_tokens(jwt: &JwtService, user: UserRecord) -> Result<LoginResponse, ApiError> {
        let AccessToken {
            token: access_token,
            ttl_description,
            ..
        } = jwt.issue_access_token(&user.email)?;
        let refresh_token = jwt.issue_refresh_token(&user.email)?;

        Ok(LoginResponse {
            user: user.into(),
            access_token,
            expires_at: ttl_description,
            refresh_token,
        })
    }
}
