//! Startup sequence.
//!
//! Shared clients are constructed in dependency order before the listener is bound:
//! HTTP client, webhook, database, session store, notifier. Any failure here is fatal; only
//! the "server started" notification is best-effort.

use std::{net::SocketAddr, time::Duration};

use sea_orm::DatabaseConnection;
use time::Duration as SessionDuration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    error::AppError,
    service::{
        notification::Notification,
        notifier::{Notifier, NotifierWorker, NOTIFIER_CAPACITY},
        webhook::Webhook,
    },
    state::AppState,
};

/// Timeout applied to every outbound request, webhook deliveries included.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Sessions expire after a week without activity.
const SESSION_INACTIVITY_DAYS: i64 = 7;

/// Everything built during startup.
pub struct Services {
    /// State handed to request handlers.
    pub state: AppState,
    /// Session middleware backed by the database pool.
    pub session_layer: SessionManagerLayer<SqliteStore>,
    /// Owner of the background notifier task, consumed at shutdown.
    pub notifier_worker: NotifierWorker,
}

/// Runs the startup sequence against the configured database.
///
/// # Returns
/// - `Ok(Services)` - All shared clients constructed
/// - `Err(AppError)` - HTTP client, database or session store setup failed
pub async fn initialize(config: &Config) -> Result<Services, AppError> {
    let http_client = setup_reqwest_client()?;
    let webhook = setup_webhook(config, http_client.clone());
    let db = connect_to_database(config).await?;

    build_services(config, db, http_client, webhook).await
}

/// Assembles the services around already constructed clients.
///
/// Creates the session store on the database pool and spawns the notifier.
pub async fn build_services(
    config: &Config,
    db: DatabaseConnection,
    http_client: reqwest::Client,
    webhook: Webhook,
) -> Result<Services, AppError> {
    let session_layer = connect_to_session(&db).await?;
    let (notifier, notifier_worker) = Notifier::spawn(webhook.clone(), NOTIFIER_CAPACITY);

    Ok(Services {
        state: AppState::new(db, http_client, webhook, notifier, config),
        session_layer,
        notifier_worker,
    })
}

/// Builds the shared outbound HTTP client.
///
/// Redirects are not followed so a forwarded request can never be bounced to an internal
/// address.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(HTTP_TIMEOUT)
        .build()?;

    Ok(client)
}

/// Builds the webhook client for the configured URL.
pub fn setup_webhook(config: &Config, http_client: reqwest::Client) -> Webhook {
    Webhook::new(http_client, config.webhook_url.clone())
}

/// Connects to the SQLite database.
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database pool
/// - `Err(AppError)` - Failed to connect
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Ok(db)
}

/// Creates the session store on the database pool and returns the session middleware.
///
/// Runs the store's table migration, so it is safe to call against a fresh database.
pub async fn connect_to_session(
    db: &DatabaseConnection,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store
        .migrate()
        .await
        .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;

    let layer = SessionManagerLayer::new(session_store).with_expiry(Expiry::OnInactivity(
        SessionDuration::days(SESSION_INACTIVITY_DAYS),
    ));

    Ok(layer)
}

/// Posts the "server started" notification.
///
/// Awaited directly rather than queued; a failure is logged and startup continues.
pub async fn log_server_start(webhook: &Webhook, addr: SocketAddr) {
    match webhook.send(&Notification::ServerStarted { addr }.content()).await {
        Ok(()) => tracing::debug!("Server start notification delivered"),
        Err(e) => tracing::warn!("Failed to deliver server start notification: {}", e),
    }
}
