//! Background delivery of webhook notifications.
//!
//! Request handlers must never wait on Discord. `Notifier::notify` pushes onto a bounded
//! channel without blocking and a single worker task drains the channel, posting each
//! notification through the `Webhook`. When the queue is full the notification is dropped
//! and logged. Delivery failures are logged and swallowed.
//!
//! `NotifierWorker::shutdown` stops the worker after it has delivered everything already
//! queued.

use tokio::{
    sync::{
        mpsc::{self, error::TrySendError},
        oneshot,
    },
    task::JoinHandle,
};

use crate::server::service::{notification::Notification, webhook::Webhook};

/// Queue capacity used by the server.
pub const NOTIFIER_CAPACITY: usize = 64;

/// Handle for enqueuing notifications; cheap to clone into request state.
#[derive(Clone, Debug)]
pub struct Notifier {
    tx: mpsc::Sender<Notification>,
}

/// Owner of the background delivery task.
pub struct NotifierWorker {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl Notifier {
    /// Spawns the delivery task and returns the enqueue handle plus its owner.
    ///
    /// # Arguments
    /// - `webhook` - Webhook every notification is posted to
    /// - `capacity` - Maximum number of undelivered notifications held at once
    pub fn spawn(webhook: Webhook, capacity: usize) -> (Self, NotifierWorker) {
        let (tx, rx) = mpsc::channel(capacity);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(run(webhook, rx, shutdown_rx));

        (
            Self { tx },
            NotifierWorker {
                shutdown: shutdown_tx,
                handle,
            },
        )
    }

    /// Enqueues a notification without waiting.
    ///
    /// Returns immediately whether or not the notification was accepted.
    pub fn notify(&self, notification: Notification) {
        match self.tx.try_send(notification) {
            Ok(()) => {}
            Err(TrySendError::Full(notification)) => {
                tracing::warn!(
                    ?notification,
                    "Notification queue is full, dropping notification"
                );
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!("Notifier has shut down, dropping notification");
            }
        }
    }
}

impl NotifierWorker {
    /// Delivers everything still queued, then stops the worker.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());

        if let Err(e) = self.handle.await {
            tracing::error!("Notifier task failed: {}", e);
        }
    }
}

async fn run(
    webhook: Webhook,
    mut rx: mpsc::Receiver<Notification>,
    mut shutdown: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            received = rx.recv() => match received {
                Some(notification) => deliver(&webhook, &notification).await,
                None => return,
            },
        }
    }

    rx.close();
    while let Some(notification) = rx.recv().await {
        deliver(&webhook, &notification).await;
    }
}

async fn deliver(webhook: &Webhook, notification: &Notification) {
    if let Err(e) = webhook.send(&notification.content()).await {
        tracing::warn!("Failed to deliver webhook notification: {}", e);
    }
}
