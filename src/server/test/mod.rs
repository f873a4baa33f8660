//! HTTP-level tests.
//!
//! Each test spawns the full application on an ephemeral loopback port, with mock endpoints
//! standing in for the Discord webhook and the metadata API, and talks to it over real HTTP.

use std::{net::SocketAddr, time::Duration};

use axum::{http::StatusCode, routing::get, Router};
use test_utils::{
    builder::TestBuilder,
    context::TestContext,
    mock::{RecordedRequests, Request},
};
use tokio::{net::TcpListener, task::JoinHandle};

use crate::server::{
    config::Config,
    error::{AppError, GENERIC_ERROR_MESSAGE},
    router,
    service::notifier::NotifierWorker,
    shutdown,
    startup::{self, Services},
    state::AppState,
};


/// Host the legacy route answers on in tests.
const LEGACY_HOST: &str = "api.kybr.tk";

/// How long tests wait for webhook deliveries.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// A running application instance.
struct TestApp {
    addr: SocketAddr,
    client: reqwest::Client,
    context: TestContext,
    state: AppState,
    notifier_worker: NotifierWorker,
    server: JoinHandle<()>,
}

impl TestApp {
    /// Spawns the application with no extra route groups.
    async fn spawn(context: TestContext) -> Self {
        Self::spawn_with(context, Router::new()).await
    }

    /// Spawns the application with `route_groups` merged next to the built-in routes.
    async fn spawn_with(context: TestContext, route_groups: Router<AppState>) -> Self {
        let config = test_config(&context);
        Self::spawn_configured(context, config, route_groups).await
    }

    /// Spawns the application with an explicit configuration.
    async fn spawn_configured(
        mut context: TestContext,
        config: Config,
        route_groups: Router<AppState>,
    ) -> Self {
        let db = context.database().await.unwrap().clone();

        let http_client = startup::setup_reqwest_client().unwrap();
        let webhook = startup::setup_webhook(&config, http_client.clone());

        let Services {
            state,
            session_layer,
            notifier_worker,
        } = startup::build_services(&config, db, http_client, webhook)
            .await
            .unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router::app(state.clone(), session_layer, route_groups);

        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .no_proxy()
            .build()
            .unwrap();

        Self {
            addr,
            client,
            context,
            state,
            notifier_worker,
            server,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    /// Stops the listener and runs the shutdown sequence.
    async fn shutdown(self) -> TestContext {
        self.server.abort();
        shutdown::teardown(self.state, self.notifier_worker).await;
        self.context
    }
}

/// Configuration pointing at the context's mocks, or at a closed port when a mock is absent.
fn test_config(context: &TestContext) -> Config {
    let webhook_url = context
        .webhook_url()
        .unwrap_or_else(|| format!("http://{}/api/webhooks/1/token", closed_addr()));
    let metadata_url = context
        .upstream_url()
        .unwrap_or_else(|| format!("http://{}/metadata", closed_addr()));

    Config::from_lookup(|name| {
        let value = match name {
            "HOST" => "127.0.0.1".to_string(),
            "PORT" => "0".to_string(),
            "DATABASE_URL" => "sqlite::memory:".to_string(),
            "WEBHOOK_URL" => webhook_url.clone(),
            "PASSWORD" => "hunter2".to_string(),
            "STATIC_DIR" => concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string(),
            "LEGACY_HOST" => LEGACY_HOST.to_string(),
            "METADATA_URL" => metadata_url.clone(),
            _ => return None,
        };
        Some(value)
    })
    .unwrap()
}

/// An address nothing is listening on.
fn closed_addr() -> SocketAddr {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
}

/// Webhook `content` of every delivery recorded so far.
fn contents(requests: &[Request]) -> Vec<String> {
    requests
        .iter()
        .map(|request| {
            let payload: serde_json::Value = request.body_json().unwrap();
            payload["content"].as_str().unwrap().to_string()
        })
        .collect()
}

/// Route group with handlers that fail in each supported way.
fn failing_routes() -> Router<AppState> {
    Router::new()
        .route("/ok", get(|| async { "fine" }))
        .route(
            "/teapot",
            get(|| async {
                Err::<(), _>(AppError::structured(StatusCode::IM_A_TEAPOT, "short and stout"))
            }),
        )
        .route(
            "/boom",
            get(|| async {
                Err::<(), _>(AppError::unstructured(std::io::Error::other(format!(
                    "disk on fire {}",
                    "x".repeat(2000)
                ))))
            }),
        )
        .route("/panic", get(panicking))
}

async fn panicking() -> &'static str {
    panic!("handler exploded")
}
