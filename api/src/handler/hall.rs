use crate::{
    extractor::{AdminUser, QueryParams, ValidatedJson},
    model::hall::{
        AvailabilityQuery, AvailabilityResponse, CreateHallRequest, HallResponse,
        UpdateHallRequest,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use kernel::model::{booking::slot::parse_start_time, id::HallId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn show_hall_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<HallResponse>>> {
    registry
        .hall_repository()
        .find_all()
        .await
        .map(|halls| halls.into_iter().map(HallResponse::from).collect())
        .map(Json)
}

pub async fn show_hall(
    Path(hall_id): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<HallResponse>> {
    let hall_id = HallId::from(hall_id);
    registry
        .hall_repository()
        .find_by_id(&hall_id)
        .await
        .and_then(|hall| match hall {
            Some(hall) => Ok(Json(hall.into())),
            None => Err(AppError::EntityNotFound(format!("Hall {hall_id} not found"))),
        })
}

pub async fn register_hall(
    AdminUser(admin): AdminUser,
    State(registry): State<AppRegistry>,
    ValidatedJson(req): ValidatedJson<CreateHallRequest>,
) -> AppResult<(StatusCode, Json<HallResponse>)> {
    let hall = registry.hall_repository().create(req.into()).await?;
    tracing::info!(hall_id = %hall.hall_id, by = %admin.subject, "hall registered");
    Ok((StatusCode::CREATED, Json(hall.into())))
}

pub async fn update_hall(
    AdminUser(admin): AdminUser,
    Path(hall_id): Path<String>,
    State(registry): State<AppRegistry>,
    ValidatedJson(req): ValidatedJson<UpdateHallRequest>,
) -> AppResult<Json<HallResponse>> {
    let hall = registry
        .hall_repository()
        .update(HallId::from(hall_id), req.into())
        .await?;
    tracing::info!(hall_id = %hall.hall_id, by = %admin.subject, "hall updated");
    Ok(Json(hall.into()))
}

pub async fn check_availability(
    Path(hall_id): Path<String>,
    QueryParams(query): QueryParams<AvailabilityQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AvailabilityResponse>> {
    let hall_id = HallId::from(hall_id);
    let date = NaiveDate::parse_from_str(query.date.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::InvalidRequest(format!("Invalid date: {} (expected YYYY-MM-DD)", query.date))
    })?;
    let start_time = parse_start_time(query.start_time.trim())?;

    let available = registry
        .booking_service()
        .check_availability(&hall_id, date, start_time)
        .await?;
    Ok(Json(AvailabilityResponse {
        hall_id,
        date: date.to_string(),
        start_time: query.start_time.trim().to_string(),
        available,
    }))
}
