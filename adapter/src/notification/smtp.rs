use super::message::{compose, OutboundEmail};
use async_trait::async_trait;
use kernel::notification::{Notification, NotificationError, NotificationSender};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use shared::config::{SenderConfig, SmtpConfig};

/// Sends mail over SMTP with STARTTLS.
pub struct SmtpSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    admin_email: Option<String>,
}

impl SmtpSender {
    pub fn new(
        config: &SmtpConfig,
        sender: SenderConfig,
        admin_email: Option<String>,
    ) -> Result<Self, NotificationError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| NotificationError::Transport(format!("SMTP relay error: {e}")))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        let from = mailbox(&sender.name, &sender.email)?;
        Ok(Self {
            transport,
            from,
            admin_email,
        })
    }
}

fn mailbox(name: &str, email: &str) -> Result<Mailbox, NotificationError> {
    let address: Address = email
        .parse()
        .map_err(|e| NotificationError::InvalidMessage(format!("Invalid address {email}: {e}")))?;
    Ok(Mailbox::new(Some(name.to_string()), address))
}

fn build_message(from: Mailbox, email: &OutboundEmail) -> Result<Message, NotificationError> {
    Message::builder()
        .from(from)
        .to(mailbox(&email.to.name, &email.to.email)?)
        .subject(email.subject.clone())
        .header(ContentType::TEXT_HTML)
        .body(email.html.clone())
        .map_err(|e| NotificationError::InvalidMessage(format!("Failed to build email: {e}")))
}

#[async_trait]
impl NotificationSender for SmtpSender {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        let email = compose(notification, self.admin_email.as_deref())?;
        let message = build_message(self.from.clone(), &email)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::Transport(format!("Failed to send email: {e}")))?;
        tracing::debug!(kind = notification.kind(), to = %email.to.email, "sent via smtp");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::message::fixtures;

    fn from() -> Mailbox {
        mailbox("Event Booking System", "bookings@example.com").unwrap()
    }

    #[test]
    fn builds_html_message() {
        let email = compose(&Notification::BookingReceived(fixtures::booking()), None).unwrap();
        let message = build_message(from(), &email).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("<aiko@example.com>"));
        assert!(raw.contains("Subject: Booking received for October 17, 2026"));
        assert!(raw.contains("Content-Type: text/html"));
    }

    #[test]
    fn invalid_recipient_is_reported() {
        let mut booking = fixtures::booking();
        booking.customer_email = "not an address".into();
        let email = compose(&Notification::BookingReceived(booking), None).unwrap();
        assert!(matches!(
            build_message(from(), &email),
            Err(NotificationError::InvalidMessage(_))
        ));
    }
}
