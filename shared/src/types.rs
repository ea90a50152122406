//! API request and response types

use crate::models::User;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default page size for list endpoints
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Largest page size a client may request
pub const MAX_PAGE_LIMIT: i64 = 100;

// ============================================================================
// Envelopes
// ============================================================================

/// Success envelope for a single item (or no item)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Envelope with `"data": null`
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Success envelope for a page of items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> ListResponse<T> {
    pub fn ok(message: impl Into<String>, data: Vec<T>, meta: PageMeta) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            meta,
        }
    }
}

/// Pagination details attached to list responses
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PageMeta {
    pub fn new(page: &Pagination, total: i64) -> Self {
        let total_pages = if total <= 0 {
            0
        } else {
            (total + page.limit - 1) / page.limit
        };
        Self {
            page: page.page,
            limit: page.limit,
            total,
            total_pages,
        }
    }
}

/// Error envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
}

// ============================================================================
// Pagination
// ============================================================================

/// Raw list query string: `?page=&limit=&search=`
///
/// Values are kept as strings so that junk input falls back to defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

/// Normalized pagination and search parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    /// Lower-cased search term, `None` when absent or blank
    pub search: Option<String>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            search: None,
        }
    }
}

impl Pagination {
    /// Row offset of the first item on this page
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// `%term%` pattern for SQL `LIKE`, if a search term is set
    pub fn like_pattern(&self) -> Option<String> {
        self.search.as_ref().map(|s| format!("%{}%", s))
    }
}

impl ListQuery {
    pub fn normalize(&self) -> Pagination {
        let page = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);

        let limit = self
            .limit
            .as_deref()
            .and_then(|l| l.trim().parse::<i64>().ok())
            .filter(|l| *l >= 1)
            .map(|l| l.min(MAX_PAGE_LIMIT))
            .unwrap_or(DEFAULT_PAGE_LIMIT);

        let search = self
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase());

        Pagination { page, limit, search }
    }
}

// ============================================================================
// Auth
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Refresh-token exchange request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Tokens handed out by login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub access_token: String,
    /// Human-readable access token lifetime, e.g. "1 day"
    pub expires_at: String,
    pub refresh_token: String,
}

// ============================================================================
// Products
// ============================================================================

/// Create product request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

/// Partial product update; absent, empty or non-positive values are ignored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

// ============================================================================
// Bank accounts
// ============================================================================

/// Create or update bank account request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BankAccountRequest {
    pub bank_name: String,
    pub account_no: String,
}

/// Deposit request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddMoneyRequest {
    pub amount: Decimal,
}
