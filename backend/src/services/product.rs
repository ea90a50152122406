//! Product catalog service

use crate::error::ApiError;
use crate::repositories::{NewProduct, ProductChanges, ProductRepository};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use vaultshop_shared::models::Product;
use vaultshop_shared::types::{CreateProductRequest, PageMeta, Pagination, UpdateProductRequest};
use vaultshop_shared::validation::validate_price;

fn not_found() -> ApiError {
    ApiError::NotFound("Product not found".to_string())
}

/// Parse a path id; malformed ids are reported like missing products
pub fn parse_product_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| not_found())
}

/// Keep only the fields an update is allowed to overwrite
///
/// Empty strings and non-positive prices are ignored rather than rejected.
pub fn product_changes(req: UpdateProductRequest) -> ProductChanges {
    ProductChanges {
        name: req.name.filter(|n| !n.trim().is_empty()),
        description: req.description.filter(|d| !d.is_empty()),
        price: req.price.filter(|p| validate_price(*p).is_ok()),
    }
}

/// Product service
pub struct ProductService;

impl ProductService {
    pub async fn create(pool: &PgPool, req: CreateProductRequest) -> Result<Product, ApiError> {
        if req.name.trim().is_empty() || validate_price(req.price).is_err() {
            return Err(ApiError::BadRequest(
                "Name and price are required".to_string(),
            ));
        }

        let record = ProductRepository::create(
            pool,
            NewProduct {
                name: req.name,
                description: req.description,
                price: req.price,
            },
        )
        .await?;

        info!(product_id = %record.id, "Product created");
        Ok(record.into())
    }

    pub async fn list(
        pool: &PgPool,
        page: &Pagination,
    ) -> Result<(Vec<Product>, PageMeta), ApiError> {
        let records = ProductRepository::list(pool, page).await?;
        let total = ProductRepository::count(pool, page).await?;

        Ok((
            records.into_iter().map(Product::from).collect(),
            PageMeta::new(page, total),
        ))
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> Result<Product, ApiError> {
        ProductRepository::find_by_id(pool, id)
            .await?
            .map(Product::from)
            .ok_or_else(not_found)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: UpdateProductRequest,
    ) -> Result<Product, ApiError> {
        ProductRepository::update(pool, id, product_changes(req))
            .await?
            .map(Product::from)
            .ok_or_else(not_found)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        if !ProductRepository::soft_delete(pool, id).await? {
            return Err(not_found());
        }
        info!(product_id = %id, "Product deleted");
        Ok(())
    }
}
