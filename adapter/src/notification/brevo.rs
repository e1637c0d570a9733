use super::message::{compose, Audience, OutboundEmail};
use async_trait::async_trait;
use kernel::notification::{Notification, NotificationError, NotificationSender};
use serde_json::json;
use shared::config::{BrevoConfig, SenderConfig};

/// Sends mail through Brevo's transactional email API (`POST /smtp/email`).
pub struct BrevoSender {
    client: reqwest::Client,
    config: BrevoConfig,
    sender: SenderConfig,
    admin_email: Option<String>,
}

impl BrevoSender {
    pub fn new(config: BrevoConfig, sender: SenderConfig, admin_email: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            sender,
            admin_email,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/smtp/email", self.config.base_url.trim_end_matches('/'))
    }

    // テンプレート引数があればテンプレート送信、なければ本文をそのまま送る
    fn payload(&self, email: &OutboundEmail) -> serde_json::Value {
        let mut body = json!({
            "sender": { "name": self.sender.name, "email": self.sender.email },
            "to": [{ "email": email.to.email, "name": email.to.name }],
        });
        match &email.template_params {
            Some(params) => {
                let template_id = match email.audience {
                    Audience::Customer => self.config.customer_template_id,
                    Audience::Admin => self.config.admin_template_id,
                };
                body["templateId"] = json!(template_id);
                body["params"] = params.clone();
            }
            None => {
                body["subject"] = json!(email.subject);
                body["htmlContent"] = json!(email.html);
            }
        }
        body
    }
}

#[async_trait]
impl NotificationSender for BrevoSender {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        let email = compose(notification, self.admin_email.as_deref())?;
        let res = self
            .client
            .post(self.endpoint())
            .header("api-key", &self.config.api_key)
            .json(&self.payload(&email))
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        tracing::debug!(kind = notification.kind(), to = %email.to.email, "sent via brevo");
        Ok(())
    }
}
