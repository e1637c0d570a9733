use kernel::notification::{Notification, NotificationDispatcher, NotificationSender};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Fire-and-forget dispatcher backed by a bounded queue and one worker task.
///
/// `dispatch` never waits. When the queue is full the message is dropped with a
/// warning; delivery errors from the sender are logged by the worker.
#[derive(Clone)]
pub struct QueuedDispatcher {
    tx: mpsc::Sender<Notification>,
}

impl QueuedDispatcher {
    /// Starts the worker on the current tokio runtime.
    pub fn spawn(sender: Arc<dyn NotificationSender>, capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<Notification>(capacity.max(1));
        tokio::spawn(async move {
            while let Some(notification) = rx.recv().await {
                if let Err(e) = sender.send(&notification).await {
                    tracing::warn!(
                        kind = notification.kind(),
                        error.message = %e,
                        "failed to deliver notification"
                    );
                }
            }
            tracing::debug!("notification worker stopped");
        });
        Self { tx }
    }
}

impl NotificationDispatcher for QueuedDispatcher {
    fn dispatch(&self, notification: Notification) {
        match self.tx.try_send(notification) {
            Ok(()) => {}
            Err(TrySendError::Full(n)) => {
                tracing::warn!(kind = n.kind(), "notification queue is full, dropping message");
            }
            Err(TrySendError::Closed(n)) => {
                tracing::warn!(kind = n.kind(), "notification worker is gone, dropping message");
            }
        }
    }
}
