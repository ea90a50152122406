//! Authentication gate
//!
//! Every `/api` route sits behind [`auth_middleware`]. A request is either
//! authenticated, with its email stored in the request extensions, or
//! rejected with 401 before any handler runs.

use super::jwt::{JwtService, TokenError};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{FromRef, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use vaultshop_shared::errors::AuthError;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity resolved from a valid access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub email: String,
}

/// Resolve an `Authorization` header value to an identity
///
/// The header must carry the exact, case-sensitive `"Bearer "` prefix. No
/// whitespace is trimmed.
pub fn authenticate(jwt: &JwtService, header: Option<&str>) -> Result<AuthUser, AuthError> {
    let header = match header {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthError::MissingToken),
    };

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::InvalidScheme)?;

    let claims = jwt.verify_access_token(token).map_err(|e| {
        debug!(reason = %e, "Rejected access token");
        match e {
            TokenError::Expired => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    })?;

    Ok(AuthUser {
        email: claims.email,
    })
}

fn authenticate_headers(jwt: &JwtService, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
    let header = match headers.get(AUTHORIZATION) {
        None => None,
        Some(value) => Some(value.to_str().map_err(|_| AuthError::InvalidScheme)?),
    };
    Ok(authenticate(jwt, header)?)
}

/// Middleware guarding a group of routes
///
/// Applied with `axum::middleware::from_fn_with_state` as a route layer.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate_headers(state.jwt(), request.headers())?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Extractor for handlers behind the gate
///
/// Reuses the identity stored by [`auth_middleware`]; when used on a route
/// without the middleware it validates the header itself.
#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let app_state = AppState::from_ref(state);
        authenticate_headers(app_state.jwt(), &parts.headers)
    }
}
