//! Shutdown sequence.
//!
//! Runs after the listener has stopped and the last request completed: drain the notifier,
//! post "server stopped", then close the database and release the HTTP client.

use crate::server::{
    service::{notification::Notification, notifier::NotifierWorker, webhook::Webhook},
    state::AppState,
};

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Tears down shared clients in order.
///
/// Never fails: delivery and close errors are logged.
pub async fn teardown(state: AppState, notifier_worker: NotifierWorker) {
    let AppState {
        db,
        http_client,
        webhook,
        ..
    } = state;

    notifier_worker.shutdown().await;
    log_server_stop(&webhook).await;

    if let Err(e) = db.close().await {
        tracing::warn!("Failed to close database connection: {}", e);
    }
    drop(webhook);
    drop(http_client);

    tracing::info!("Shutdown complete");
}

/// Posts the "server stopped" notification; a failure is logged.
pub async fn log_server_stop(webhook: &Webhook) {
    match webhook.send(&Notification::ServerStopped.content()).await {
        Ok(()) => tracing::debug!("Server stop notification delivered"),
        Err(e) => tracing::warn!("Failed to deliver server stop notification: {}", e),
    }
}
