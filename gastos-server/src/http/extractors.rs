//! Custom Axum extractors
//!
//! Same as `Json` and `Query`, but rejections are reported through
//! `ApiError` so every failure carries the JSON error body.

use axum::extract::{FromRequest, FromRequestParts};

use super::error::ApiError;

/// JSON body extractor with JSON rejections
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor with JSON rejections
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
