use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers::field_schedule, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/v1/field/schedule", post(field_schedule::create))
        .route(
            "/api/v1/field/schedule/one-month",
            post(field_schedule::generate_schedule_for_one_month),
        )
        .route(
            "/api/v1/field/schedule/pagination",
            get(field_schedule::get_all_with_pagination),
        )
        .route(
            "/api/v1/field/schedule/status",
            patch(field_schedule::update_status),
        )
        .route(
            "/api/v1/field/schedule/lists/:field_id",
            get(field_schedule::get_all_by_field_id_and_date),
        )
        .route(
            "/api/v1/field/schedule/:id",
            get(field_schedule::get_by_uuid)
                .put(field_schedule::update)
                .delete(field_schedule::delete),
        )
}
