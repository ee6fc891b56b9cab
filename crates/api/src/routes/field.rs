use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers::field, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/v1/field",
            get(field::get_all_without_pagination).post(field::create),
        )
        .route("/api/v1/field/pagination", get(field::get_all_with_pagination))
        .route(
            "/api/v1/field/:id",
            get(field::get_by_uuid)
                .put(field::update)
                .delete(field::delete),
        )
}
