use crate::model::id::{BookingId, HallId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

pub mod event;
pub mod slot;
pub mod status;

pub use status::BookingStatus;

use slot::TimeSlot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub booking_id: BookingId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub guest_count: i32,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub special_requests: Option<String>,
    pub status: BookingStatus,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub hall: BookingHall,
}

impl Booking {
    pub fn slot(&self) -> TimeSlot {
        TimeSlot::starting_at(self.event_date, self.start_time)
    }
}

// 予約一覧などで一緒に返すホールの概要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingHall {
    pub hall_id: HallId,
    pub hall_name: String,
}

#[derive(Debug, Default)]
pub struct BookingListOptions {
    pub status: Option<BookingStatus>,
    pub hall_id: Option<HallId>,
}

/// Result of a status update: the stored booking plus what it was before.
#[derive(Debug, Clone)]
pub struct BookingStatusChange {
    pub previous: BookingStatus,
    pub booking: Booking,
}

impl BookingStatusChange {
    pub fn is_noop(&self) -> bool {
        self.previous == self.booking.status
    }
}
