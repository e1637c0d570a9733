use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use strum::{Display, EnumString, VariantNames};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    /// Parses a client supplied status, rejecting anything outside the three known values.
    pub fn parse(value: &str) -> AppResult<Self> {
        value.parse().map_err(|_| {
            AppError::InvalidRequest(format!(
                "Invalid status value: {value} (expected one of {})",
                Self::VARIANTS.join(", ")
            ))
        })
    }

    /// Cancelled bookings no longer hold their slot.
    pub fn holds_slot(self) -> bool {
        self != BookingStatus::Cancelled
    }

    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, _) | (Confirmed, Confirmed) | (Confirmed, Cancelled) | (Cancelled, Cancelled)
        )
    }

    pub fn transition_to(self, next: BookingStatus) -> AppResult<BookingStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(AppError::InvalidStatusTransition(format!(
                "Cannot change booking status from {self} to {next}"
            )))
        }
    }
}
