use crate::model::{hall::HallRates, id::HallId};

#[derive(Debug)]
pub struct CreateHall {
    pub hall_id: HallId,
    pub hall_name: String,
    pub capacity: i32,
    pub rates: HallRates,
    pub features: String,
}

#[derive(Debug, Default)]
pub struct UpdateHall {
    pub hall_name: Option<String>,
    pub capacity: Option<i32>,
    pub base_price: Option<i64>,
    pub weekend_rate: Option<i64>,
    pub peak_rate: Option<i64>,
    pub features: Option<String>,
}
