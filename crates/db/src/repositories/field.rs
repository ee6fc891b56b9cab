use async_trait::async_trait;
use chrono::Utc;
use eyre::Result;
use fieldsched_core::{
    errors::{ScheduleError, ScheduleResult},
    models::field::{Field, FieldListParams, FieldPatch, NewField},
    repository::FieldRepository,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{error::into_schedule_error, models::DbField};

const FIELD_COLUMNS: &str = "id, uuid, code, name, price_per_hour, images, created_at, updated_at";

pub async fn get_field_by_uuid(pool: &Pool<Postgres>, uuid: Uuid) -> Result<Option<DbField>> {
    tracing::debug!("Getting field by uuid: {}", uuid);

    let query = format!("SELECT {FIELD_COLUMNS} FROM fields WHERE uuid = $1");
    let field = sqlx::query_as::<_, DbField>(&query)
        .bind(uuid)
        .fetch_optional(pool)
        .await?;

    Ok(field)
}

pub async fn get_fields(pool: &Pool<Postgres>) -> Result<Vec<DbField>> {
    let query = format!("SELECT {FIELD_COLUMNS} FROM fields ORDER BY created_at ASC, id ASC");
    let fields = sqlx::query_as::<_, DbField>(&query).fetch_all(pool).await?;

    Ok(fields)
}

pub async fn get_fields_paginated(
    pool: &Pool<Postgres>,
    params: FieldListParams,
) -> Result<(Vec<DbField>, i64)> {
    // Column and direction come from closed enums, never from raw input.
    let query = format!(
        "SELECT {FIELD_COLUMNS} FROM fields \
         ORDER BY {} {}, id {} \
         LIMIT $1 OFFSET $2",
        params.sort_column.as_str(),
        params.sort_order.as_str(),
        params.sort_order.as_str(),
    );
    let fields = sqlx::query_as::<_, DbField>(&query)
        .bind(params.limit)
        .bind(params.offset())
        .fetch_all(pool)
        .await?;

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM fields")
        .fetch_one(pool)
        .await?;

    Ok((fields, total))
}

pub async fn create_field(pool: &Pool<Postgres>, field: &NewField) -> Result<DbField> {
    let now = Utc::now();
    let query = format!(
        "INSERT INTO fields (uuid, code, name, price_per_hour, images, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $6) \
         RETURNING {FIELD_COLUMNS}"
    );
    let row = sqlx::query_as::<_, DbField>(&query)
        .bind(field.uuid)
        .bind(&field.code)
        .bind(&field.name)
        .bind(field.price_per_hour)
        .bind(&field.images)
        .bind(now)
        .fetch_one(pool)
        .await?;

    Ok(row)
}

pub async fn update_field(
    pool: &Pool<Postgres>,
    uuid: Uuid,
    patch: &FieldPatch,
) -> Result<Option<DbField>> {
    let query = format!(
        "UPDATE fields \
         SET code = $2, name = $3, price_per_hour = $4, images = $5, updated_at = $6 \
         WHERE uuid = $1 \
         RETURNING {FIELD_COLUMNS}"
    );
    let row = sqlx::query_as::<_, DbField>(&query)
        .bind(uuid)
        .bind(&patch.code)
        .bind(&patch.name)
        .bind(patch.price_per_hour)
        .bind(&patch.images)
        .bind(Utc::now())
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Returns whether a row was removed.
pub async fn delete_field(pool: &Pool<Postgres>, uuid: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM fields WHERE uuid = $1")
        .bind(uuid)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub struct PgFieldRepository {
    pool: Pool<Postgres>,
}

impl PgFieldRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FieldRepository for PgFieldRepository {
    async fn find_all_paginated(
        &self,
        params: FieldListParams,
    ) -> ScheduleResult<(Vec<Field>, i64)> {
        let (rows, total) = get_fields_paginated(&self.pool, params)
            .await
            .map_err(into_schedule_error)?;

        Ok((rows.into_iter().map(Field::from).collect(), total))
    }

    async fn find_all(&self) -> ScheduleResult<Vec<Field>> {
        let rows = get_fields(&self.pool).await.map_err(into_schedule_error)?;
        Ok(rows.into_iter().map(Field::from).collect())
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> ScheduleResult<Option<Field>> {
        let field = get_field_by_uuid(&self.pool, uuid)
            .await
            .map_err(into_schedule_error)?;

        Ok(field.map(Field::from))
    }

    async fn create(&self, field: NewField) -> ScheduleResult<Field> {
        create_field(&self.pool, &field)
            .await
            .map(Field::from)
            .map_err(into_schedule_error)
    }

    async fn update(&self, uuid: Uuid, patch: FieldPatch) -> ScheduleResult<Field> {
        update_field(&self.pool, uuid, &patch)
            .await
            .map_err(into_schedule_error)?
            .map(Field::from)
            .ok_or_else(|| ScheduleError::field_not_found(uuid))
    }

    async fn delete(&self, uuid: Uuid) -> ScheduleResult<()> {
        let deleted = delete_field(&self.pool, uuid)
            .await
            .map_err(into_schedule_error)?;

        if deleted {
            Ok(())
        } else {
            Err(ScheduleError::field_not_found(uuid))
        }
    }
}
