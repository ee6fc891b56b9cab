use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers::time_slot, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/v1/time", get(time_slot::get_all).post(time_slot::create))
        .route("/api/v1/time/:id", get(time_slot::get_by_uuid))
}
