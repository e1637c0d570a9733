use crate::model::id::ContactId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use strum::{Display, EnumString, VariantNames};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub contact_id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// unread -> read -> replied の順に進むのが通常だが、戻しも許可する
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContactStatus {
    Unread,
    Read,
    Replied,
}

impl ContactStatus {
    pub fn parse(value: &str) -> AppResult<Self> {
        value.parse().map_err(|_| {
            AppError::InvalidRequest(format!(
                "Invalid status value: {value} (expected one of {})",
                Self::VARIANTS.join(", ")
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_values_only() {
        assert_eq!(ContactStatus::parse("unread").unwrap(), ContactStatus::Unread);
        assert_eq!(ContactStatus::parse("read").unwrap(), ContactStatus::Read);
        assert_eq!(ContactStatus::parse("replied").unwrap(), ContactStatus::Replied);
        assert!(ContactStatus::parse("archived").is_err());
        assert!(ContactStatus::parse("pending").is_err());
    }
}
