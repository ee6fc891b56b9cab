use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use fieldsched_core::models::{
    pagination::PaginationResult,
    schedule::{
        FieldScheduleForBookingResponse, FieldScheduleRequest, FieldScheduleRequestParam,
        FieldScheduleResponse, GenerateFieldScheduleForOneMonthRequest,
        UpdateFieldScheduleRequest, UpdateStatusFieldScheduleRequest,
    },
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Query string of the booking listing.
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedSchedulesResponse {
    pub created: usize,
}

pub async fn get_all_with_pagination(
    State(state): State<Arc<ApiState>>,
    Query(param): Query<FieldScheduleRequestParam>,
) -> Result<Json<PaginationResult<FieldScheduleResponse>>, AppError> {
    let page = state.field_schedules.get_all_with_pagination(param).await?;
    Ok(Json(page))
}

pub async fn get_all_by_field_id_and_date(
    State(state): State<Arc<ApiState>>,
    Path(field_id): Path<Uuid>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<FieldScheduleForBookingResponse>>, AppError> {
    let schedules = state
        .field_schedules
        .get_all_by_field_id_and_date(field_id, &query.date)
        .await?;
    Ok(Json(schedules))
}

pub async fn get_by_uuid(
    State(state): State<Arc<ApiState>>,
    Path(uuid): Path<Uuid>,
) -> Result<Json<FieldScheduleResponse>, AppError> {
    let schedule = state.field_schedules.get_by_uuid(uuid).await?;
    Ok(Json(schedule))
}

pub async fn generate_schedule_for_one_month(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<GenerateFieldScheduleForOneMonthRequest>,
) -> Result<(StatusCode, Json<CreatedSchedulesResponse>), AppError> {
    let created = state
        .field_schedules
        .generate_schedule_for_one_month(payload)
        .await?;
    Ok((StatusCode::CREATED, Json(CreatedSchedulesResponse { created })))
}

pub async fn create(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<FieldScheduleRequest>,
) -> Result<(StatusCode, Json<CreatedSchedulesResponse>), AppError> {
    let created = state.field_schedules.create(payload).await?;
    Ok((StatusCode::CREATED, Json(CreatedSchedulesResponse { created })))
}

pub async fn update(
    State(state): State<Arc<ApiState>>,
    Path(uuid): Path<Uuid>,
    Json(payload): Json<UpdateFieldScheduleRequest>,
) -> Result<Json<FieldScheduleResponse>, AppError> {
    let schedule = state.field_schedules.update(uuid, payload).await?;
    Ok(Json(schedule))
}

pub async fn update_status(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<UpdateStatusFieldScheduleRequest>,
) -> Result<StatusCode, AppError> {
    state.field_schedules.update_status(payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<Arc<ApiState>>,
    Path(uuid): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.field_schedules.delete(uuid).await?;
    Ok(StatusCode::NO_CONTENT)
}
