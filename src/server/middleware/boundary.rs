//! Outermost error boundary.
//!
//! Every failing request passes through `error_boundary` exactly once. The boundary takes the
//! `ErrorReport` that `AppError::into_response` attached to the response and, depending on its
//! tier:
//!
//! - **Structured** - logs the status and message, responds with that status and message
//! - **Unstructured** - logs the full trace, queues the trace for the error webhook without
//!   waiting, responds 500 with the generic message
//!
//! Responses without a report pass through untouched. Panics are turned into unstructured
//! errors by `panic_response`, installed through `CatchPanicLayer` inside this boundary.

use std::any::Any;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::server::{
    error::{internal::InternalError, AppError, ErrorReport},
    service::notification::Notification,
    state::AppState,
};

/// Maps failed requests to their final response and reports them.
pub async fn error_boundary(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let mut response = next.run(request).await;

    let Some(report) = response.extensions_mut().remove::<ErrorReport>() else {
        return response;
    };

    match &report {
        ErrorReport::Structured { status, message } => {
            tracing::warn!(
                %method,
                %uri,
                status = status.as_u16(),
                "Request failed: {}",
                message
            );
        }
        ErrorReport::Unstructured { trace } => {
            let trace = format!("{method} {uri}\n{trace}");
            tracing::error!(%method, %uri, "Unhandled error while serving request\n{}", trace);

            state.notifier.notify(Notification::ServerError { trace });
        }
    }

    report.render()
}

/// Converts a handler panic into an unstructured error response.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "non-string panic payload".to_string()
    };

    AppError::unstructured(InternalError::Panic(message)).into_response()
}
