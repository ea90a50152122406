//! Bank account API routes
//!
//! Every handler acts for the authenticated user.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::AppJson;
use crate::services::bank::{parse_bank_id, BankService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use vaultshop_shared::models::BankAccount;
use vaultshop_shared::types::{
    AddMoneyRequest, ApiResponse, BankAccountRequest, ListQuery, ListResponse,
};

/// Create bank routes (mounted under `/api`)
pub fn bank_routes() -> Router<AppState> {
    Router::new()
        .route("/bank", post(add_bank))
        .route("/banks", get(list_banks))
        .route("/bank/:id", put(update_bank).delete(delete_bank))
        .route("/bank/:id/add-money", put(add_money))
}

/// POST /api/bank
async fn add_bank(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(req): AppJson<BankAccountRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<BankAccount>>)> {
    let account = BankService::add(state.db(), &auth.email, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Bank added successfully", account)),
    ))
}

/// GET /api/banks?page=&limit=&search=
async fn list_banks(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ListResponse<BankAccount>>> {
    let page = query.normalize();
    let (items, meta) = BankService::list(state.db(), &auth.email, &page).await?;
    Ok(Json(ListResponse::ok("Banks retrieved successfully", items, meta)))
}

/// PUT /api/bank/:id
async fn update_bank(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    AppJson(req): AppJson<BankAccountRequest>,
) -> ApiResult<Json<ApiResponse<BankAccount>>> {
    let account = BankService::update(state.db(), &auth.email, parse_bank_id(&id)?, req).await?;
    Ok(Json(ApiResponse::ok("Bank updated successfully", account)))
}

/// DELETE /api/bank/:id
async fn delete_bank(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    BankService::delete(state.db(), &auth.email, parse_bank_id(&id)?).await?;
    Ok(Json(ApiResponse::empty("Bank deleted successfully")))
}

/// PUT /api/bank/:id/add-money
async fn add_money(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    AppJson(req): AppJson<AddMoneyRequest>,
) -> ApiResult<Json<ApiResponse<BankAccount>>> {
    let account =
        BankService::add_money(state.db(), &auth.email, parse_bank_id(&id)?, req.amount).await?;
    Ok(Json(ApiResponse::ok("Money added successfully", account)))
}
