use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use fieldsched_core::models::{
    field::{FieldRequest, FieldRequestParam, FieldResponse, UpdateFieldRequest},
    pagination::PaginationResult,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

pub async fn get_all_with_pagination(
    State(state): State<Arc<ApiState>>,
    Query(param): Query<FieldRequestParam>,
) -> Result<Json<PaginationResult<FieldResponse>>, AppError> {
    Ok(Json(state.fields.get_all_with_pagination(param).await?))
}

pub async fn get_all_without_pagination(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<FieldResponse>>, AppError> {
    Ok(Json(state.fields.get_all_without_pagination().await?))
}

pub async fn get_by_uuid(
    State(state): State<Arc<ApiState>>,
    Path(uuid): Path<Uuid>,
) -> Result<Json<FieldResponse>, AppError> {
    Ok(Json(state.fields.get_by_uuid(uuid).await?))
}

pub async fn create(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<FieldRequest>,
) -> Result<(StatusCode, Json<FieldResponse>), AppError> {
    let field = state.fields.create(payload).await?;
    Ok((StatusCode::CREATED, Json(field)))
}

pub async fn update(
    State(state): State<Arc<ApiState>>,
    Path(uuid): Path<Uuid>,
    Json(payload): Json<UpdateFieldRequest>,
) -> Result<Json<FieldResponse>, AppError> {
    Ok(Json(state.fields.update(uuid, payload).await?))
}

pub async fn delete(
    State(state): State<Arc<ApiState>>,
    Path(uuid): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.fields.delete(uuid).await?;
    Ok(StatusCode::NO_CONTENT)
}
