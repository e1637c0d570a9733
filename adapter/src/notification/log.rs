use super::message::compose;
use async_trait::async_trait;
use derive_new::new;
use kernel::notification::{Notification, NotificationError, NotificationSender};

/// Writes notifications to the log instead of sending them. Used when no mail
/// provider is configured.
#[derive(new)]
pub struct LogSender {
    admin_email: Option<String>,
}

#[async_trait]
impl NotificationSender for LogSender {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        let email = compose(notification, self.admin_email.as_deref())?;
        tracing::info!(
            kind = notification.kind(),
            to = %email.to.email,
            subject = %email.subject,
            "notification (log transport)"
        );
        Ok(())
    }
}
