//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for route groups that persist data
//! - HTTP client for forwarding legacy requests
//! - Discord webhook client and the background notifier in front of it
//! - The shared secret handed to route groups
//! - Static and legacy route settings

use std::path::PathBuf;

use sea_orm::DatabaseConnection;
use url::Url;

use crate::server::{
    config::Config,
    service::{notifier::Notifier, webhook::Webhook},
};

/// Application state containing shared resources and dependencies.
///
/// All fields use cheap-to-clone types:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `reqwest::Client` uses an `Arc` internally
/// - `Webhook` wraps the same `reqwest::Client`
/// - `Notifier` is a channel sender
///
/// Nothing in the state is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    ///
    /// The session store shares this pool.
    pub db: DatabaseConnection,

    /// HTTP client for making external API requests.
    ///
    /// Configured not to follow redirects and with a request timeout.
    pub http_client: reqwest::Client,

    /// Discord webhook for lifecycle notifications.
    pub webhook: Webhook,

    /// Queue for error notifications posted from the request path.
    pub notifier: Notifier,

    /// Shared secret available to route groups.
    pub password: String,

    /// Directory holding the index page, the login template and static assets.
    pub static_dir: PathBuf,

    /// Host the legacy `/modmail` route answers on.
    pub legacy_host: String,

    /// Endpoint legacy `/modmail` requests are forwarded or redirected to.
    pub metadata_url: Url,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `http_client` - HTTP client for external API requests
    /// - `webhook` - Discord webhook client
    /// - `notifier` - Error notification queue
    /// - `config` - Configuration supplying the secret and route settings
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        webhook: Webhook,
        notifier: Notifier,
        config: &Config,
    ) -> Self {
        Self {
            db,
            http_client,
            webhook,
            notifier,
            password: config.password.clone(),
            static_dir: config.static_dir.clone(),
            legacy_host: config.legacy_host.clone(),
            metadata_url: config.metadata_url.clone(),
        }
    }
}
