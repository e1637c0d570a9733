use crate::{
    extractor::{QueryParams, StaffUser, ValidatedJson},
    handler::path_id,
    model::booking::{
        BookingListQuery, BookingResponse, BookingsResponse, CreateBookingRequest,
        CreateBookingRequestWithTime, CreateBookingResponse, UpdateBookingStatusRequest,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use kernel::model::{
    booking::event::{CreateBooking, UpdateBookingStatus},
    id::BookingId,
};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn register_booking(
    State(registry): State<AppRegistry>,
    ValidatedJson(req): ValidatedJson<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<CreateBookingResponse>)> {
    // 過去日時の判定にはサーバーの現地時刻を使う
    let event = CreateBooking::try_from(CreateBookingRequestWithTime::new(
        req,
        Local::now().naive_local(),
    ))?;

    registry
        .booking_service()
        .create(event)
        .await
        .map(|booking| (StatusCode::CREATED, Json(booking.into())))
}

pub async fn show_booking_list(
    _user: StaffUser,
    QueryParams(query): QueryParams<BookingListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    registry
        .booking_service()
        .find_all(query.try_into()?)
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

pub async fn show_booking(
    _user: StaffUser,
    Path(booking_id): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    let booking_id: BookingId = path_id(&booking_id, "Booking")?;
    registry
        .booking_service()
        .find_by_id(booking_id)
        .await
        .map(BookingResponse::from)
        .map(Json)
}

pub async fn update_booking_status(
    StaffUser(staff): StaffUser,
    Path(booking_id): Path<String>,
    State(registry): State<AppRegistry>,
    ValidatedJson(req): ValidatedJson<UpdateBookingStatusRequest>,
) -> AppResult<Json<BookingResponse>> {
    let booking_id: BookingId = path_id(&booking_id, "Booking")?;
    let status = req.status()?;
    tracing::debug!(%booking_id, %status, by = %staff.subject, "booking status update requested");

    registry
        .booking_service()
        .update_status(UpdateBookingStatus::new(booking_id, status))
        .await
        .map(BookingResponse::from)
        .map(Json)
}
