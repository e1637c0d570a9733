use crate::model::id::HallId;
use chrono::{DateTime, Utc};

pub mod event;
pub mod pricing;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hall {
    pub hall_id: HallId,
    pub hall_name: String,
    pub capacity: i32,
    pub rates: HallRates,
    pub features: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Whole-currency-unit prices a hall is rented at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HallRates {
    pub base_price: i64,
    /// Added when the event falls on a Saturday or Sunday.
    pub weekend_rate: i64,
    /// Added when the event starts within the peak window.
    pub peak_rate: i64,
}
