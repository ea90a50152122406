//! Request extractors

use crate::error::ApiError;
use axum::extract::FromRequest;

/// JSON body extractor whose rejection is an [`ApiError::BadRequest`]
///
/// Keeps malformed bodies inside the standard error envelope instead of
/// axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);
