//! Slot arithmetic and the availability rule for hall bookings.
//!
//! Every booking occupies a fixed two hour window. Two windows conflict when
//! they overlap as half-open intervals, so back-to-back bookings are allowed.

use crate::model::id::BookingId;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use shared::error::{AppError, AppResult};

pub const BOOKING_DURATION_HOURS: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeSlot {
    pub fn starting_at(date: NaiveDate, start: NaiveTime) -> Self {
        let start = date.and_time(start);
        Self {
            start,
            end: start + Duration::hours(BOOKING_DURATION_HOURS),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Clock time the slot ends at; wraps past midnight for late starts.
    pub fn end_time(&self) -> NaiveTime {
        self.end.time()
    }

    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// A slot held by an existing, non-cancelled booking.
#[derive(Debug, Clone, Copy)]
pub struct ReservedSlot {
    pub booking_id: BookingId,
    pub slot: TimeSlot,
}

/// Returns the first reserved booking whose window overlaps `candidate`.
pub fn find_conflict<'a, I>(candidate: &TimeSlot, reserved: I) -> Option<BookingId>
where
    I: IntoIterator<Item = &'a ReservedSlot>,
{
    reserved
        .into_iter()
        .find(|r| r.slot.overlaps(candidate))
        .map(|r| r.booking_id)
}

/// Parses a 24 hour `HH:MM` start time. Single digit hours are rejected.
pub fn parse_start_time(value: &str) -> AppResult<NaiveTime> {
    let invalid = || AppError::InvalidRequest(format!("Invalid start time: {value} (expected HH:MM)"));
    if value.len() != 5 || value.as_bytes()[2] != b':' {
        return Err(invalid());
    }
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| invalid())
}

pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}
