use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    booking::{
        event::CreateBooking,
        slot::{format_clock, parse_start_time},
        Booking, BookingHall, BookingListOptions, BookingStatus,
    },
    id::{BookingId, HallId},
};
use serde::{Deserialize, Deserializer, Serialize};
use shared::error::AppError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[garde(length(min = 1))]
    pub hall_id: String,
    #[garde(length(min = 1))]
    pub customer_name: String,
    #[garde(email)]
    pub customer_email: String,
    #[garde(length(min = 1))]
    pub customer_phone: String,
    #[garde(range(min = 1))]
    pub guest_count: i32,
    #[serde(deserialize_with = "deserialize_event_date")]
    #[garde(skip)]
    pub event_date: NaiveDate,
    #[garde(length(min = 1))]
    pub start_time: String,
    #[garde(skip)]
    pub special_requests: Option<String>,
}

// 日付のみ（YYYY-MM-DD）と RFC 3339 の日時の両方を受け付ける
fn deserialize_event_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_event_date(&raw).map_err(serde::de::Error::custom)
}

fn parse_event_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| format!("invalid eventDate: {raw} (expected YYYY-MM-DD or RFC 3339)"))
}

// 受付時刻を付与した予約リクエスト
#[derive(new)]
pub struct CreateBookingRequestWithTime(CreateBookingRequest, NaiveDateTime);

impl TryFrom<CreateBookingRequestWithTime> for CreateBooking {
    type Error = AppError;

    fn try_from(value: CreateBookingRequestWithTime) -> Result<Self, Self::Error> {
        let CreateBookingRequestWithTime(
            CreateBookingRequest {
                hall_id,
                customer_name,
                customer_email,
                customer_phone,
                guest_count,
                event_date,
                start_time,
                special_requests,
            },
            requested_at,
        ) = value;
        let start_time = parse_start_time(start_time.trim())?;
        Ok(CreateBooking::new(
            HallId::from(hall_id),
            customer_name,
            customer_email,
            customer_phone,
            guest_count,
            event_date,
            start_time,
            special_requests.filter(|s| !s.trim().is_empty()),
            requested_at,
        ))
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusRequest {
    #[garde(length(min = 1))]
    pub status: String,
}

impl UpdateBookingStatusRequest {
    pub fn status(&self) -> Result<BookingStatus, AppError> {
        BookingStatus::parse(self.status.trim())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingListQuery {
    pub status: Option<String>,
    pub hall_id: Option<String>,
}

impl TryFrom<BookingListQuery> for BookingListOptions {
    type Error = AppError;

    fn try_from(value: BookingListQuery) -> Result<Self, Self::Error> {
        let status = value
            .status
            .filter(|s| !s.is_empty())
            .map(|s| BookingStatus::parse(&s))
            .transpose()?;
        Ok(BookingListOptions {
            status,
            hall_id: value.hall_id.filter(|h| !h.is_empty()).map(HallId::from),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: BookingId,
    pub hall_id: HallId,
    pub hall_name: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub guest_count: i32,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub special_requests: Option<String>,
    pub status: BookingStatus,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id,
            customer_name,
            customer_email,
            customer_phone,
            guest_count,
            event_date,
            start_time,
            end_time,
            special_requests,
            status,
            total_price,
            created_at,
            updated_at,
            hall: BookingHall { hall_id, hall_name },
        } = value;
        Self {
            id: booking_id,
            hall_id,
            hall_name,
            customer_name,
            customer_email,
            customer_phone,
            guest_count,
            event_date,
            start_time: format_clock(start_time),
            end_time: format_clock(end_time),
            special_requests,
            status,
            total_price,
            created_at,
            updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub items: Vec<BookingResponse>,
}

impl From<Vec<Booking>> for BookingsResponse {
    fn from(value: Vec<Booking>) -> Self {
        Self {
            items: value.into_iter().map(BookingResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    pub id: BookingId,
    pub status: BookingStatus,
    pub booking: BookingResponse,
}

impl From<Booking> for CreateBookingResponse {
    fn from(value: Booking) -> Self {
        Self {
            id: value.booking_id,
            status: value.status,
            booking: value.into(),
        }
    }
}
