//! Legacy `/modmail` endpoint on the old API host.
//!
//! Old bot versions still post their metadata to `/modmail` on the legacy host. Posts are
//! forwarded to the current metadata endpoint and reads are redirected there.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::server::{error::AppError, middleware::host::LegacyHost, state::AppState};

/// Redirects to the metadata endpoint with `302 Found`.
pub async fn redirect_metadata(_host: LegacyHost, State(state): State<AppState>) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, state.metadata_url.as_str())],
    )
        .into_response()
}

/// Forwards the JSON body to the metadata endpoint.
///
/// The upstream response is not inspected. The reply key is misspelled `sucess` because
/// existing clients read it that way.
///
/// # Returns
/// - `Ok(Json)` - `{"sucess": true}` once the forward request completed
/// - `Err(AppError::Structured)` - 400 when the body is not JSON, or the body could not be
///   read (for example 413 over the body limit)
/// - `Err(AppError::Unstructured)` - Forward request failed
pub async fn forward_metadata(
    _host: LegacyHost,
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, AppError> {
    let payload = parse_json_body(&body?)?;

    state
        .http_client
        .post(state.metadata_url.clone())
        .json(&payload)
        .send()
        .await?;

    Ok(Json(json!({ "sucess": true })))
}

/// Parses a request body as JSON; an empty body is `null`.
fn parse_json_body(body: &[u8]) -> Result<Value, AppError> {
    if body.is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_slice(body)
        .map_err(|_| AppError::bad_request("Failed when parsing body as json"))
}
