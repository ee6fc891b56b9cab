
use axum::http::StatusCode;
use chrono::Utc;
use fieldsched_core::{errors::ScheduleError, models::field::Field};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use test_utils::{field, TestContext};

#[tokio::test]
async fn test_create_field() {
    let mut ctx = TestContext::new();
    ctx.field_repo
        .expect_create()
        .withf(|new| new.code == "LAP-07" && new.images.len() == 1)
        .times(1)
        .returning(|new| {
            Ok(Field {
                id: 7,
                uuid: new.uuid,
                code: new.code,
                name: new.name,
                price_per_hour: new.price_per_hour,
                images: new.images,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        });

    let response = ctx
        .server()
        .post("/api/v1/field")
        .json(&json!({
            "code": "LAP-07",
            "name": "Lapangan Basket",
            "price_per_hour": 80000,
            "images": ["https://cdn.example.com/basket.jpg"],
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "LAP-07");
    assert_eq!(body["price_per_hour"], 80000);
}

#[tokio::test]
async fn test_create_field_with_taken_code_returns_409() {
    let mut ctx = TestContext::new();
    ctx.field_repo
        .expect_create()
        .returning(|_| Err(ScheduleError::FieldCodeAlreadyExists));

    let response = ctx
        .server()
        .post("/api/v1/field")
        .json(&json!({ "code": "LAP-01", "name": "Lapangan A", "price_per_hour": 1 }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["code"], "FIELD_CODE_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_create_field_with_negative_price_returns_400() {
    let mut ctx = TestContext::new();
    ctx.field_repo.expect_create().never();

    let response = ctx
        .server()
        .post("/api/v1/field")
        .json(&json!({ "code": "LAP-01", "name": "Lapangan A", "price_per_hour": -5 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_fields() {
    let mut ctx = TestContext::new();
    ctx.field_repo
        .expect_find_all()
        .returning(|| Ok(vec![field(1), field(2)]));

    let response = ctx.server().get("/api/v1/field").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_paginated_fields() {
    let mut ctx = TestContext::new();
    ctx.field_repo
        .expect_find_all_paginated()
        .withf(|params| params.page == 1 && params.limit == 2)
        .returning(|_| Ok((vec![field(1), field(2)], 5)));

    let response = ctx
        .server()
        .get("/api/v1/field/pagination")
        .add_query_param("page", 1)
        .add_query_param("limit", 2)
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["total_page"], 3);
    assert_eq!(body["next_page"], 2);
}

#[tokio::test]
async fn test_get_field() {
    let mut ctx = TestContext::new();
    let stored = field(3);
    let uuid = stored.uuid;
    ctx.field_repo
        .expect_find_by_uuid()
        .with(eq(uuid))
        .returning(move |_| Ok(Some(stored.clone())));

    let response = ctx.server().get(&format!("/api/v1/field/{uuid}")).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["name"], "Lapangan 3");
}

#[tokio::test]
async fn test_update_field_keeps_images_when_omitted() {
    let mut ctx = TestContext::new();
    let mut stored = field(3);
    stored.images = vec!["https://cdn.example.com/old.jpg".to_string()];
    let uuid = stored.uuid;
    let current = stored.clone();

    ctx.field_repo
        .expect_find_by_uuid()
        .returning(move |_| Ok(Some(current.clone())));
    ctx.field_repo
        .expect_update()
        .withf(|_, patch| patch.images == vec!["https://cdn.example.com/old.jpg".to_string()])
        .times(1)
        .returning(move |_, patch| {
            let mut updated = stored.clone();
            updated.name = patch.name;
            updated.images = patch.images;
            Ok(updated)
        });

    let response = ctx
        .server()
        .put(&format!("/api/v1/field/{uuid}"))
        .json(&json!({ "code": "LAP-03", "name": "Lapangan Tiga", "price_per_hour": 120000 }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["name"], "Lapangan Tiga");
}

#[tokio::test]
async fn test_delete_field() {
    let mut ctx = TestContext::new();
    let stored = field(3);
    let uuid = stored.uuid;
    ctx.field_repo
        .expect_find_by_uuid()
        .returning(move |_| Ok(Some(stored.clone())));
    ctx.field_repo
        .expect_delete()
        .with(eq(uuid))
        .times(1)
        .returning(|_| Ok(()));

    let response = ctx.server().delete(&format!("/api/v1/field/{uuid}")).await;

    response.assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_missing_field_returns_404() {
    let mut ctx = TestContext::new();
    ctx.field_repo.expect_find_by_uuid().returning(|_| Ok(None));
    ctx.field_repo.expect_delete().never();

    let response = ctx
        .server()
        .delete(&format!("/api/v1/field/{}", Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_schedule_routes_are_not_shadowed() {
    let mut ctx = TestContext::new();
    ctx.field_repo.expect_find_by_uuid().never();
    ctx.schedule_repo
        .expect_find_all_paginated()
        .returning(|_| Ok((vec![], 0)));

    let response = ctx
        .server()
        .get("/api/v1/field/schedule/pagination")
        .add_query_param("page", 1)
        .add_query_param("limit", 10)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["count"], 0);
}
