use axum::{
    extract::OriginalUri,
    http::{Method, StatusCode},
};

use crate::server::error::AppError;

/// Structured 404 for paths no route or static file matches.
///
/// Uses the original URI so paths under nested services keep their prefix.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::not_found(format!("Requested URL {} not found", uri.path()))
}

/// Structured 405 for known paths requested with an unsupported method.
pub async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::structured(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("Method {} not allowed for URL {}", method, uri.path()),
    )
}
