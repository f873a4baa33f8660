use reqwest::StatusCode;
use thiserror::Error;

/// Failures delivering a message to the Discord webhook.
///
/// Webhook delivery is best-effort, so these errors are logged by callers and never
/// surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum WebhookError {
    /// The request could not be sent or timed out.
    #[error(transparent)]
    Delivery(#[from] reqwest::Error),

    /// Discord answered with a non-success status.
    #[error("Webhook rejected message with status {0}")]
    Rejected(StatusCode),
}
