//! Authentication routes
//!
//! Public endpoints for registration, login and refresh-token exchange,
//! plus the protected current-user endpoint.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::AppJson;
use crate::services::UserService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use vaultshop_shared::models::User;
use vaultshop_shared::types::{
    ApiResponse, LoginRequest, LoginResponse, RefreshTokenRequest, RegisterRequest,
};

/// Routes reachable without a token
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
}

/// POST /register
///
/// Password hashing is offloaded to the blocking thread pool.
async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<User>>)> {
    let user = UserService::register(
        state.db(),
        state.passwords(),
        &req.name,
        &req.email,
        &req.password,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("User registered successfully", user)),
    ))
}

/// POST /login
async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    let tokens = UserService::login(state.db(), state.jwt(), &req.email, &req.password).await?;
    Ok(Json(ApiResponse::ok("Login successful", tokens)))
}

/// POST /refresh
async fn refresh_token(
    State(state): State<AppState>,
    AppJson(req): AppJson<RefreshTokenRequest>,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    let tokens = UserService::refresh(state.db(), state.jwt(), &req.refresh_token).await?;
    Ok(Json(ApiResponse::ok("Token refreshed successfully", tokens)))
}

/// GET /api/user
pub(crate) async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = UserService::get_profile(state.db(), &auth.email).await?;
    Ok(Json(ApiResponse::ok("User data retrieved successfully", user)))
}
