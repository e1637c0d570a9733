use anyhow::{bail, Context, Result};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub notification: NotificationConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // 環境変数の取得方法を差し替えられるようにしておく（テスト用）
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key).with_context(|| format!("environment variable {key} is not set"))
        };
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database = DatabaseConfig {
            host: required("DATABASE_HOST")?,
            port: parse_or(&lookup, "DATABASE_PORT", 5432)?,
            username: required("DATABASE_USERNAME")?,
            password: required("DATABASE_PASSWORD")?,
            database: required("DATABASE_NAME")?,
        };

        let server = ServerConfig {
            port: parse_or(&lookup, "PORT", 8080)?,
        };

        let auth = AuthConfig {
            admin_token: required("ADMIN_TOKEN")?,
            jwt_secret: optional("JWT_SECRET"),
        };
        if auth.admin_token.trim().is_empty() {
            bail!("ADMIN_TOKEN must not be empty");
        }

        let provider = match optional("MAIL_PROVIDER") {
            Some(v) => v.parse::<MailProvider>()?,
            None => MailProvider::Log,
        };
        let sender = SenderConfig {
            email: optional("FROM_EMAIL").unwrap_or_else(|| "bookings@localhost".into()),
            name: optional("FROM_NAME").unwrap_or_else(|| "Event Booking System".into()),
        };
        let notification = NotificationConfig {
            admin_email: optional("ADMIN_EMAIL"),
            queue_capacity: parse_or(&lookup, "NOTIFICATION_QUEUE_CAPACITY", 64)?,
            transport: match provider {
                MailProvider::Log => MailTransportConfig::Log,
                MailProvider::Brevo => MailTransportConfig::Brevo(BrevoConfig {
                    api_key: required("BREVO_API_KEY")?,
                    base_url: optional("BREVO_BASE_URL")
                        .unwrap_or_else(|| "https://api.brevo.com/v3".into()),
                    customer_template_id: parse_or(&lookup, "BREVO_CUSTOMER_TEMPLATE_ID", 1)?,
                    admin_template_id: parse_or(&lookup, "BREVO_ADMIN_TEMPLATE_ID", 2)?,
                }),
                MailProvider::Smtp => MailTransportConfig::Smtp(SmtpConfig {
                    host: required("SMTP_HOST")?,
                    port: parse_or(&lookup, "SMTP_PORT", 587)?,
                    username: required("SMTP_USERNAME")?,
                    password: required("SMTP_PASSWORD")?,
                }),
            },
            sender,
        };

        let cors = CorsConfig {
            allowed_origins: optional("ALLOWED_ORIGINS")
                .unwrap_or_else(|| "http://localhost:5190,http://localhost:5173".into())
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),
        };

        Ok(Self {
            database,
            server,
            auth,
            notification,
            cors,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .with_context(|| format!("environment variable {key} has an invalid value: {v}")),
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub admin_token: String,
    pub jwt_secret: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MailProvider {
    Log,
    Brevo,
    Smtp,
}

#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub admin_email: Option<String>,
    pub queue_capacity: usize,
    pub sender: SenderConfig,
    pub transport: MailTransportConfig,
}

#[derive(Debug, Clone)]
pub struct SenderConfig {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub enum MailTransportConfig {
    Log,
    Brevo(BrevoConfig),
    Smtp(SmtpConfig),
}

#[derive(Debug, Clone)]
pub struct BrevoConfig {
    pub api_key: String,
    pub base_url: String,
    pub customer_template_id: i64,
    pub admin_template_id: i64,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}
