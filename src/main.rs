mod server;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::server::{
    config::Config,
    error::AppError,
    router, shutdown,
    startup::{self, Services},
};

const DEFAULT_LOG_FILTER: &str = "modmail_web=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let Services {
        state,
        session_layer,
        notifier_worker,
    } = startup::initialize(&config).await?;

    let listener = TcpListener::bind(config.bind_address()).await?;
    let addr = listener.local_addr()?;

    tracing::info!("Server started on {}", addr);
    startup::log_server_start(&state.webhook, addr).await;

    let app = router::app(state.clone(), session_layer, axum::Router::new());

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await;

    shutdown::teardown(state, notifier_worker).await;

    served?;
    Ok(())
}
