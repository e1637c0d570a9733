use crate::model::{contact::ContactStatus, id::ContactId};
use derive_new::new;
use garde::Validate;
use shared::error::{AppError, AppResult};

#[derive(Debug, Clone, new, Validate)]
pub struct CreateContact {
    #[garde(skip)]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(skip)]
    pub phone: Option<String>,
    #[garde(skip)]
    pub subject: String,
    #[garde(skip)]
    pub message: String,
}

impl CreateContact {
    pub fn validate(&self) -> AppResult<()> {
        let required = [
            ("name", &self.name),
            ("subject", &self.subject),
            ("message", &self.message),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(AppError::InvalidRequest(format!("{field} is required")));
        }
        Validate::validate(self, &())?;
        Ok(())
    }
}

#[derive(Debug, Clone, new)]
pub struct UpdateContactStatus {
    pub contact_id: ContactId,
    pub status: ContactStatus,
}
