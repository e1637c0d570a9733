use kernel::model::{
    hall::{Hall, HallRates},
    id::HallId,
};
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct HallRow {
    pub hall_id: HallId,
    pub hall_name: String,
    pub capacity: i32,
    pub base_price: i64,
    pub weekend_rate: i64,
    pub peak_rate: i64,
    pub features: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HallRow> for Hall {
    fn from(value: HallRow) -> Self {
        let HallRow {
            hall_id,
            hall_name,
            capacity,
            base_price,
            weekend_rate,
            peak_rate,
            features,
            created_at,
            updated_at,
        } = value;
        Hall {
            hall_id,
            hall_name,
            capacity,
            rates: HallRates {
                base_price,
                weekend_rate,
                peak_rate,
            },
            features,
            created_at,
            updated_at,
        }
    }
}
