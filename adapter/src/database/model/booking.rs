use kernel::model::{
    booking::{
        slot::{ReservedSlot, TimeSlot},
        Booking, BookingHall, BookingStatus,
    },
    id::{BookingId, HallId},
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, NaiveDate, NaiveTime, Utc};

// 予約一覧・詳細の取得に使う型。halls と JOIN してホール名も持つ
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub hall_id: HallId,
    pub hall_name: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub guest_count: i32,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub special_requests: Option<String>,
    pub status: String,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(value: BookingRow) -> Result<Self, Self::Error> {
        let BookingRow {
            booking_id,
            hall_id,
            hall_name,
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
        } = value;
        let status = status.parse::<BookingStatus>().map_err(|_| {
            AppError::ConversionEntityError(format!(
                "booking {booking_id} has an unknown status: {status}"
            ))
        })?;
        Ok(Booking {
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
        })
    }
}

// 空き確認に必要な列だけを持つ型
#[derive(sqlx::FromRow)]
pub struct ReservedSlotRow {
    pub booking_id: BookingId,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
}

impl From<ReservedSlotRow> for ReservedSlot {
    fn from(value: ReservedSlotRow) -> Self {
        ReservedSlot {
            booking_id: value.booking_id,
            slot: TimeSlot::starting_at(value.event_date, value.start_time),
        }
    }
}
