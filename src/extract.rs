use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` extractor whose rejections render as `InvalidRequest` envelopes.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
