//! Notification transports and the background dispatcher.
//!
//! `build_sender` picks the transport from configuration; `QueuedDispatcher`
//! hands messages to it from a detached worker so request handlers never wait
//! on mail delivery.

use kernel::notification::{NotificationError, NotificationSender};
use shared::config::{MailTransportConfig, NotificationConfig};
use std::sync::Arc;

pub mod brevo;
pub mod dispatcher;
pub mod log;
pub mod message;
pub mod smtp;

pub use dispatcher::QueuedDispatcher;

pub fn build_sender(
    config: &NotificationConfig,
) -> Result<Arc<dyn NotificationSender>, NotificationError> {
    let admin_email = config.admin_email.clone();
    let sender: Arc<dyn NotificationSender> = match &config.transport {
        MailTransportConfig::Log => Arc::new(log::LogSender::new(admin_email)),
        MailTransportConfig::Brevo(brevo) => Arc::new(brevo::BrevoSender::new(
            brevo.clone(),
            config.sender.clone(),
            admin_email,
        )),
        MailTransportConfig::Smtp(smtp) => Arc::new(smtp::SmtpSender::new(
            smtp,
            config.sender.clone(),
            admin_email,
        )?),
    };
    Ok(sender)
}
