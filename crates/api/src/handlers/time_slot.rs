use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use fieldsched_core::models::time_slot::{CreateTimeSlotRequest, TimeSlotResponse};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

pub async fn get_all(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<TimeSlotResponse>>, AppError> {
    Ok(Json(state.time_slots.get_all().await?))
}

pub async fn get_by_uuid(
    State(state): State<Arc<ApiState>>,
    Path(uuid): Path<Uuid>,
) -> Result<Json<TimeSlotResponse>, AppError> {
    Ok(Json(state.time_slots.get_by_uuid(uuid).await?))
}

pub async fn create(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateTimeSlotRequest>,
) -> Result<(StatusCode, Json<TimeSlotResponse>), AppError> {
    let slot = state.time_slots.create(payload).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}
