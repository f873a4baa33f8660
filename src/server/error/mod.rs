//! Error types and HTTP response handling.
//!
//! This module provides the application's two-tier error taxonomy. `AppError::Structured`
//! carries an HTTP status and a message meant for the caller, while `AppError::Unstructured`
//! wraps an `InternalError` cause that must never leak to the caller.
//!
//! Converting an `AppError` into a response renders the client-facing body and attaches an
//! `ErrorReport` to the response extensions. The outermost error boundary middleware
//! (`middleware::boundary`) takes that report back out to log it and, for unstructured errors,
//! to notify the error webhook.

pub mod config;
pub mod internal;
pub mod template;
pub mod webhook;

use std::{
    backtrace::{Backtrace, BacktraceStatus},
    error::Error as _,
    fmt::Write,
};

use axum::{
    extract::rejection::{
        BytesRejection, FormRejection, JsonRejection, PathRejection, QueryRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{
    config::ConfigError, internal::InternalError, template::TemplateError, webhook::WebhookError,
};

/// Body returned to clients for every unstructured error.
pub const GENERIC_ERROR_MESSAGE: &str = "something went wrong xd";

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Expected failure raised intentionally by a handler.
    ///
    /// Results in a `text/plain` response with the given status and the message as body.
    #[error("{message}")]
    Structured {
        /// Status code returned to the client
        status: StatusCode,
        /// Message returned verbatim as the response body
        message: String,
    },

    /// Unexpected failure.
    ///
    /// Results in 500 Internal Server Error with `GENERIC_ERROR_MESSAGE` as body. The cause
    /// and the stack captured at construction are reported to operators.
    #[error("{cause}")]
    Unstructured {
        /// What went wrong
        cause: InternalError,
        /// Rendered backtrace, present when backtraces are enabled (`RUST_BACKTRACE`)
        stack: Option<String>,
    },
}

impl AppError {
    /// Creates a structured error with an explicit status and message.
    pub fn structured(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Structured {
            status,
            message: message.into(),
        }
    }

    /// 404 Not Found with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::structured(StatusCode::NOT_FOUND, message)
    }

    /// 400 Bad Request with the given message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::structured(StatusCode::BAD_REQUEST, message)
    }

    /// Creates an unstructured error, capturing the current stack when enabled.
    pub fn unstructured(cause: impl Into<InternalError>) -> Self {
        let backtrace = Backtrace::capture();
        let stack = match backtrace.status() {
            BacktraceStatus::Captured => Some(backtrace.to_string()),
            _ => None,
        };

        Self::Unstructured {
            cause: cause.into(),
            stack,
        }
    }

    /// Renders the error as operator-facing trace text.
    ///
    /// For unstructured errors this is the cause, its `source()` chain and the captured
    /// stack, if any.
    pub fn trace(&self) -> String {
        match self {
            Self::Structured { status, message } => format!("{status}: {message}"),
            Self::Unstructured { cause, stack } => {
                let mut trace = format!("Error: {cause}");

                let mut source = cause.source();
                if source.is_some() {
                    trace.push_str("\n\nCaused by:");
                }
                let mut depth = 0;
                while let Some(err) = source {
                    let _ = write!(trace, "\n    {depth}: {err}");
                    depth += 1;
                    source = err.source();
                }

                if let Some(stack) = stack {
                    trace.push_str("\n\nStack backtrace:\n");
                    trace.push_str(stack);
                }

                trace
            }
        }
    }
}

/// Implements `From<$ty> for AppError` by wrapping the value as an unstructured cause.
macro_rules! unstructured_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for AppError {
                fn from(err: $ty) -> Self {
                    Self::unstructured(err)
                }
            }
        )*
    };
}

unstructured_from!(
    InternalError,
    ConfigError,
    TemplateError,
    WebhookError,
    sea_orm::DbErr,
    reqwest::Error,
    serde_json::Error,
    std::io::Error,
    tower_sessions::session::Error,
);

/// Implements `From<$ty> for AppError` for axum extractor rejections.
///
/// The rejection keeps its own status and text, so handlers taking `Result<T, T::Rejection>`
/// can `?` it into a structured error the boundary sees.
macro_rules! structured_from_rejection {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for AppError {
                fn from(rejection: $ty) -> Self {
                    Self::structured(rejection.status(), rejection.body_text())
                }
            }
        )*
    };
}

structured_from_rejection!(
    BytesRejection,
    FormRejection,
    JsonRejection,
    PathRejection,
    QueryRejection,
);

/// What the error boundary needs to know about a failed request.
///
/// Attached to error responses as an extension, so it only holds owned, cloneable data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorReport {
    Structured { status: StatusCode, message: String },
    Unstructured { trace: String },
}

impl ErrorReport {
    /// Renders the client-facing `text/plain` response for this report.
    pub fn render(&self) -> Response {
        match self {
            Self::Structured { status, message } => (*status, message.clone()).into_response(),
            Self::Unstructured { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_MESSAGE).into_response()
            }
        }
    }
}

impl From<AppError> for ErrorReport {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Structured { status, message } => Self::Structured { status, message },
            err @ AppError::Unstructured { .. } => Self::Unstructured { trace: err.trace() },
        }
    }
}

/// Converts application errors into HTTP responses.
///
/// The body never contains internal details: structured errors show their own message,
/// unstructured errors show `GENERIC_ERROR_MESSAGE`. The `ErrorReport` extension carries
/// the details to the error boundary.
///
/// # Returns
/// - Declared status - For `Structured`
/// - 500 Internal Server Error - For `Unstructured`
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let report = ErrorReport::from(self);
        let mut response = report.render();
        response.extensions_mut().insert(report);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that a structured error renders its status and message.
    ///
    /// Expected: 418 response carrying a Structured report with the same message
    #[test]
    fn structured_error_keeps_status_and_message() {
        let response =
            AppError::structured(StatusCode::IM_A_TEAPOT, "short and stout").into_response();

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(
            response.extensions().get::<ErrorReport>(),
            Some(&ErrorReport::Structured {
                status: StatusCode::IM_A_TEAPOT,
                message: "short and stout".to_string(),
            })
        );
    }

    /// Tests that an unstructured error is masked behind a generic 500.
    ///
    /// Expected: 500 response whose report trace names the cause
    #[test]
    fn unstructured_error_is_masked() {
        let err: AppError = std::io::Error::other("disk on fire").into();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        match response.extensions().get::<ErrorReport>() {
            Some(ErrorReport::Unstructured { trace }) => {
                assert!(trace.starts_with("Error: disk on fire"));
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }

    /// Tests that the trace walks the source chain of the cause.
    ///
    /// Expected: trace lists the inner error under "Caused by"
    #[test]
    fn trace_includes_source_chain() {
        #[derive(Error, Debug)]
        #[error("outer failure")]
        struct Outer(#[source] std::io::Error);

        let err = AppError::unstructured(std::io::Error::other(Outer(std::io::Error::other(
            "inner failure",
        ))));
        let trace = err.trace();

        assert!(trace.contains("Caused by:"));
        assert!(trace.contains("inner failure"));
    }

    /// Tests the wording of the generic body.
    ///
    /// Expected: exact literal existing clients match on
    #[test]
    fn generic_message_is_stable() {
        assert_eq!(GENERIC_ERROR_MESSAGE, "something went wrong xd");
    }
}
