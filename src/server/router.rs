use std::path::Path;

use axum::{handler::HandlerWithoutStateExt, middleware, routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    controller::{
        fallback::{method_not_allowed, not_found},
        legacy::{forward_metadata, redirect_metadata},
        pages::{already_logged_in, index, logged_in},
    },
    middleware::boundary::{error_boundary, panic_response},
    state::AppState,
};

/// Routes served by this crate.
pub fn router(static_dir: &Path) -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .nest_service(
            "/static",
            ServeDir::new(static_dir).fallback(not_found.into_service()),
        )
        .route("/logged-in", get(logged_in))
        .route("/already-logged-in", get(already_logged_in))
        .route("/modmail", get(redirect_metadata).post(forward_metadata))
}

/// Builds the complete application.
///
/// `route_groups` is merged next to the built-in routes so that externally defined groups
/// run behind the same session layer and error boundary. It must not define its own fallback.
///
/// Layers, from outermost to innermost: request tracing, error boundary, panic catcher,
/// session manager.
pub fn app(
    state: AppState,
    session_layer: SessionManagerLayer<SqliteStore>,
    route_groups: Router<AppState>,
) -> Router {
    router(&state.static_dir)
        .merge(route_groups)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(session_layer)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(state.clone(), error_boundary))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
