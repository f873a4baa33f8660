use thiserror::Error;

use crate::server::error::{config::ConfigError, template::TemplateError, webhook::WebhookError};

/// Causes of unexpected failures.
///
/// Every variant is reported to operators through the error webhook and masked from
/// clients behind a generic 500 response.
#[derive(Error, Debug)]
pub enum InternalError {
    /// Database operation error from SeaORM.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// Outbound HTTP request error from reqwest.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Session store operation error.
    #[error(transparent)]
    Session(#[from] tower_sessions::session::Error),

    /// Filesystem or socket error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// HTML template could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Webhook delivery failed where a caller chose to propagate it.
    #[error(transparent)]
    Webhook(#[from] WebhookError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A request handler panicked; holds the panic payload when it was a string.
    #[error("Handler panicked: {0}")]
    Panic(String),
}
