use crate::model::{
    booking::{slot::TimeSlot, BookingStatus},
    id::{BookingId, HallId},
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use derive_new::new;
use garde::Validate;
use shared::error::{AppError, AppResult};

#[derive(Debug, Clone, new, Validate)]
pub struct CreateBooking {
    #[garde(skip)]
    pub hall_id: HallId,
    #[garde(skip)]
    pub customer_name: String,
    #[garde(email)]
    pub customer_email: String,
    #[garde(skip)]
    pub customer_phone: String,
    #[garde(skip)]
    pub guest_count: i32,
    #[garde(skip)]
    pub event_date: NaiveDate,
    #[garde(skip)]
    pub start_time: NaiveTime,
    #[garde(skip)]
    pub special_requests: Option<String>,
    // 受付時刻（ホールの現地時刻）。過去日時の予約判定に使う
    #[garde(skip)]
    pub requested_at: NaiveDateTime,
}

impl CreateBooking {
    pub fn slot(&self) -> TimeSlot {
        TimeSlot::starting_at(self.event_date, self.start_time)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.hall_id.as_str().trim().is_empty() {
            return Err(AppError::InvalidRequest("hallId is required".into()));
        }
        if self.customer_name.trim().is_empty() {
            return Err(AppError::InvalidRequest("customerName is required".into()));
        }
        Validate::validate(self, &())?;
        if self.customer_phone.trim().is_empty() {
            return Err(AppError::InvalidRequest("customerPhone is required".into()));
        }
        if self.guest_count < 1 {
            return Err(AppError::InvalidRequest(
                "guestCount must be at least 1".into(),
            ));
        }
        if self.slot().start() <= self.requested_at {
            return Err(AppError::InvalidRequest(
                "Event date must be in the future".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, new)]
pub struct UpdateBookingStatus {
    pub booking_id: BookingId,
    pub status: BookingStatus,
}
