//! Product repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use vaultshop_shared::models::Product;
use vaultshop_shared::types::Pagination;

/// Product record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRecord {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Product {
            id: record.id,
            name: record.name,
            description: record.description,
            price: record.price,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Input for creating a product
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

/// Fields to overwrite; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

/// Product repository for database operations
pub struct ProductRepository;

impl ProductRepository {
    pub async fn create(pool: &PgPool, input: NewProduct) -> Result<ProductRecord> {
        let record = sqlx::query_as::<_, ProductRecord>(
            r#"
            INSERT INTO products (id, name, description, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, price, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// One page of products, optionally filtered by a lower-case name search
    pub async fn list(pool: &PgPool, page: &Pagination) -> Result<Vec<ProductRecord>> {
        let records = sqlx::query_as::<_, ProductRecord>(
            r#"
            SELECT id, name, description, price, created_at, updated_at
            FROM products
            WHERE deleted_at IS NULL
              AND ($1::TEXT IS NULL OR LOWER(name) LIKE $1)
            ORDER BY created_at DESC, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(page.like_pattern())
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Number of products matching the same filter as [`Self::list`]
    pub async fn count(pool: &PgPool, page: &Pagination) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM products
            WHERE deleted_at IS NULL
              AND ($1::TEXT IS NULL OR LOWER(name) LIKE $1)
            "#,
        )
        .bind(page.like_pattern())
        .fetch_one(pool)
        .await?;

        Ok(total)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ProductRecord>> {
        let record = sqlx::query_as::<_, ProductRecord>(
            r#"
            SELECT id, name, description, price, created_at, updated_at
            FROM products
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Apply changes; `None` if the product does not exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        changes: ProductChanges,
    ) -> Result<Option<ProductRecord>> {
        let record = sqlx::query_as::<_, ProductRecord>(
            r#"
            UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, name, description, price, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.price)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Soft delete; `false` if the product does not exist
    pub async fn soft_delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE products SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
