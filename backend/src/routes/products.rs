//! Product API routes

use crate::error::ApiResult;
use crate::extract::AppJson;
use crate::services::product::{parse_product_id, ProductService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use vaultshop_shared::models::Product;
use vaultshop_shared::types::{
    ApiResponse, CreateProductRequest, ListQuery, ListResponse, UpdateProductRequest,
};

/// Create product routes (mounted under `/api`)
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// POST /api/products
async fn create_product(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let product = ProductService::create(state.db(), req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Product created successfully", product)),
    ))
}

/// GET /api/products?page=&limit=&search=
async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ListResponse<Product>>> {
    let page = query.normalize();
    let (items, meta) = ProductService::list(state.db(), &page).await?;
    Ok(Json(ListResponse::ok(
        "Products retrieved successfully",
        items,
        meta,
    )))
}

/// GET /api/products/:id
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Product>>> {
    let product = ProductService::get(state.db(), parse_product_id(&id)?).await?;
    Ok(Json(ApiResponse::ok("Product retrieved successfully", product)))
}

/// PUT /api/products/:id
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateProductRequest>,
) -> ApiResult<Json<ApiResponse<Product>>> {
    let product = ProductService::update(state.db(), parse_product_id(&id)?, req).await?;
    Ok(Json(ApiResponse::ok("Product updated successfully", product)))
}

/// DELETE /api/products/:id
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    ProductService::delete(state.db(), parse_product_id(&id)?).await?;
    Ok(Json(ApiResponse::empty("Product deleted successfully")))
}
