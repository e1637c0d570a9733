//! Price quotes for a hall slot.
//!
//! The peak window is defined on the hour only: any start from 18:00 up to and
//! including 22:59 pays the peak surcharge, 23:00 does not.

use super::HallRates;
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use shared::error::{AppError, AppResult};

pub const PEAK_FIRST_HOUR: u32 = 18;
pub const PEAK_LAST_HOUR: u32 = 22;

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn is_peak_hour(start: NaiveTime) -> bool {
    (PEAK_FIRST_HOUR..=PEAK_LAST_HOUR).contains(&start.hour())
}

impl HallRates {
    /// Total price of a booking on `date` starting at `start`.
    pub fn quote(&self, date: NaiveDate, start: NaiveTime) -> AppResult<i64> {
        let weekend = if is_weekend(date) { self.weekend_rate } else { 0 };
        let peak = if is_peak_hour(start) { self.peak_rate } else { 0 };
        self.base_price
            .checked_add(weekend)
            .and_then(|total| total.checked_add(peak))
            .ok_or_else(|| {
                AppError::InvalidRequest(format!(
                    "Price for {date} {} is out of range for the configured hall rates",
                    start.format("%H:%M")
                ))
            })
    }
}
