use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    hall::{
        event::{CreateHall, UpdateHall},
        Hall, HallRates,
    },
    id::HallId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHallRequest {
    #[garde(length(min = 1))]
    pub id: String,
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(range(min = 1))]
    pub capacity: i32,
    #[garde(range(min = 0, max = 1_000_000_000_000))]
    pub base_price: i64,
    #[garde(range(min = 0, max = 1_000_000_000_000))]
    pub weekend_rate: i64,
    #[garde(range(min = 0, max = 1_000_000_000_000))]
    pub peak_rate: i64,
    #[serde(default)]
    #[garde(skip)]
    pub features: String,
}

impl From<CreateHallRequest> for CreateHall {
    fn from(value: CreateHallRequest) -> Self {
        let CreateHallRequest {
            id,
            name,
            capacity,
            base_price,
            weekend_rate,
            peak_rate,
            features,
        } = value;
        CreateHall {
            hall_id: HallId::from(id),
            hall_name: name,
            capacity,
            rates: HallRates {
                base_price,
                weekend_rate,
                peak_rate,
            },
            features,
        }
    }
}

// 指定されたフィールドだけを更新する
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHallRequest {
    #[garde(length(min = 1))]
    pub name: Option<String>,
    #[garde(range(min = 1))]
    pub capacity: Option<i32>,
    #[garde(range(min = 0, max = 1_000_000_000_000))]
    pub base_price: Option<i64>,
    #[garde(range(min = 0, max = 1_000_000_000_000))]
    pub weekend_rate: Option<i64>,
    #[garde(range(min = 0, max = 1_000_000_000_000))]
    pub peak_rate: Option<i64>,
    #[garde(skip)]
    pub features: Option<String>,
}

impl From<UpdateHallRequest> for UpdateHall {
    fn from(value: UpdateHallRequest) -> Self {
        let UpdateHallRequest {
            name,
            capacity,
            base_price,
            weekend_rate,
            peak_rate,
            features,
        } = value;
        UpdateHall {
            hall_name: name,
            capacity,
            base_price,
            weekend_rate,
            peak_rate,
            features,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HallResponse {
    pub id: HallId,
    pub name: String,
    pub capacity: i32,
    pub base_price: i64,
    pub weekend_rate: i64,
    pub peak_rate: i64,
    pub features: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Hall> for HallResponse {
    fn from(value: Hall) -> Self {
        let Hall {
            hall_id,
            hall_name,
            capacity,
            rates,
            features,
            created_at,
            updated_at,
        } = value;
        Self {
            id: hall_id,
            name: hall_name,
            capacity,
            base_price: rates.base_price,
            weekend_rate: rates.weekend_rate,
            peak_rate: rates.peak_rate,
            features,
            created_at,
            updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub date: String,
    pub start_time: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub hall_id: HallId,
    pub date: String,
    pub start_time: String,
    pub available: bool,
}
