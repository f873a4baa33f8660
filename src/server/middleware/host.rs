//! Host constraint for the legacy `/modmail` route.
//!
//! Host matching is case-insensitive and ignores any port suffix. The `Host` header is used
//! when present, falling back to the authority of the request URI (HTTP/2).

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::server::{error::AppError, state::AppState};

/// Extractor that only succeeds for requests addressed to the legacy host.
///
/// Requests for any other host are rejected as 404, as if the route did not exist.
pub struct LegacyHost;

impl FromRequestParts<AppState> for LegacyHost {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let authority = parts
            .headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .or_else(|| parts.uri.authority().map(|authority| authority.as_str()));

        match authority {
            Some(authority) if host_matches(authority, &state.legacy_host) => Ok(Self),
            _ => Err(AppError::not_found(format!(
                "Requested URL {} not found",
                parts.uri.path()
            ))),
        }
    }
}

/// Whether `authority` (a `Host` header value) names `expected`.
pub fn host_matches(authority: &str, expected: &str) -> bool {
    hostname(authority).eq_ignore_ascii_case(expected)
}

/// Strips a trailing `:port` and IPv6 brackets from an authority.
fn hostname(authority: &str) -> &str {
    if let Some(bracketed) = authority.strip_prefix('[') {
        return match bracketed.split_once(']') {
            Some((host, _)) => host,
            None => bracketed,
        };
    }

    match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => host,
        _ => authority,
    }
}
