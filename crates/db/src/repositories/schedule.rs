use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use eyre::Result;
use fieldsched_core::{
    errors::{ScheduleError, ScheduleResult},
    models::schedule::{
        DetailedSchedule, NewSchedule, Schedule, ScheduleListParams, SchedulePatch,
        ScheduleStatus,
    },
    repository::ScheduleRepository,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::into_schedule_error,
    models::{DbDetailedSchedule, DbSchedule},
};

/// Columns of a `field_schedules` row aliased `fs`, joined with `fields f` and `times t`.
const DETAIL_COLUMNS: &str = "fs.id, fs.uuid, fs.field_id, fs.time_id, fs.date, fs.status, \
    fs.created_at, fs.updated_at, f.name AS field_name, f.price_per_hour, \
    t.start_time, t.end_time";

const DETAIL_JOINS: &str = "JOIN fields f ON f.id = fs.field_id JOIN times t ON t.id = fs.time_id";

pub async fn get_schedule_by_uuid(
    pool: &Pool<Postgres>,
    uuid: Uuid,
) -> Result<Option<DbDetailedSchedule>> {
    tracing::debug!("Getting field schedule by uuid: {}", uuid);

    let query = format!(
        "SELECT {DETAIL_COLUMNS} FROM field_schedules fs {DETAIL_JOINS} WHERE fs.uuid = $1"
    );
    let schedule = sqlx::query_as::<_, DbDetailedSchedule>(&query)
        .bind(uuid)
        .fetch_optional(pool)
        .await?;

    Ok(schedule)
}

pub async fn get_schedule_by_field_date_and_time(
    pool: &Pool<Postgres>,
    field_id: i64,
    date: NaiveDate,
    time_id: i64,
) -> Result<Option<DbSchedule>> {
    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT id, uuid, field_id, time_id, date, status, created_at, updated_at
        FROM field_schedules
        WHERE field_id = $1 AND date = $2 AND time_id = $3
        "#,
    )
    .bind(field_id)
    .bind(date)
    .bind(time_id)
    .fetch_optional(pool)
    .await?;

    Ok(schedule)
}

pub async fn get_schedules_paginated(
    pool: &Pool<Postgres>,
    params: ScheduleListParams,
) -> Result<(Vec<DbDetailedSchedule>, i64)> {
    // Column and direction come from closed enums, never from raw input.
    let query = format!(
        "SELECT {DETAIL_COLUMNS} FROM field_schedules fs {DETAIL_JOINS} \
         ORDER BY fs.{} {}, fs.id {} \
         LIMIT $1 OFFSET $2",
        params.sort_column.as_str(),
        params.sort_order.as_str(),
        params.sort_order.as_str(),
    );
    let schedules = sqlx::query_as::<_, DbDetailedSchedule>(&query)
        .bind(params.limit)
        .bind(params.offset())
        .fetch_all(pool)
        .await?;

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM field_schedules")
        .fetch_one(pool)
        .await?;

    Ok((schedules, total))
}

pub async fn get_schedules_by_field_and_date(
    pool: &Pool<Postgres>,
    field_id: i64,
    date: NaiveDate,
) -> Result<Vec<DbDetailedSchedule>> {
    let query = format!(
        "SELECT {DETAIL_COLUMNS} FROM field_schedules fs {DETAIL_JOINS} \
         WHERE fs.field_id = $1 AND fs.date = $2 \
         ORDER BY t.start_time ASC"
    );
    let schedules = sqlx::query_as::<_, DbDetailedSchedule>(&query)
        .bind(field_id)
        .bind(date)
        .fetch_all(pool)
        .await?;

    Ok(schedules)
}

/// Inserts every row inside one transaction. Any failure, including a
/// violation of the slot constraint, rolls the whole batch back.
pub async fn create_schedules(pool: &Pool<Postgres>, schedules: &[NewSchedule]) -> Result<()> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    for schedule in schedules {
        sqlx::query(
            r#"
            INSERT INTO field_schedules (uuid, field_id, time_id, date, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            "#,
        )
        .bind(schedule.uuid)
        .bind(schedule.field_id)
        .bind(schedule.time_id)
        .bind(schedule.date)
        .bind(schedule.status.as_str())
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::debug!("Inserted {} field schedules", schedules.len());
    Ok(())
}

pub async fn update_schedule(
    pool: &Pool<Postgres>,
    uuid: Uuid,
    date: NaiveDate,
    time_id: i64,
) -> Result<Option<DbDetailedSchedule>> {
    let query = format!(
        "WITH fs AS ( \
             UPDATE field_schedules SET date = $2, time_id = $3, updated_at = $4 \
             WHERE uuid = $1 \
             RETURNING id, uuid, field_id, time_id, date, status, created_at, updated_at \
         ) \
         SELECT {DETAIL_COLUMNS} FROM fs {DETAIL_JOINS}"
    );
    let schedule = sqlx::query_as::<_, DbDetailedSchedule>(&query)
        .bind(uuid)
        .bind(date)
        .bind(time_id)
        .bind(Utc::now())
        .fetch_optional(pool)
        .await?;

    Ok(schedule)
}

/// Returns whether a row was updated.
pub async fn update_schedule_status(
    pool: &Pool<Postgres>,
    uuid: Uuid,
    status: ScheduleStatus,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE field_schedules
        SET status = $2, updated_at = $3
        WHERE uuid = $1
        "#,
    )
    .bind(uuid)
    .bind(status.as_str())
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Returns whether a row was removed.
pub async fn delete_schedule(pool: &Pool<Postgres>, uuid: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM field_schedules WHERE uuid = $1")
        .bind(uuid)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub struct PgScheduleRepository {
    pool: Pool<Postgres>,
}

impl PgScheduleRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn into_detailed(row: DbDetailedSchedule) -> ScheduleResult<DetailedSchedule> {
    DetailedSchedule::try_from(row).map_err(ScheduleError::Persistence)
}

#[async_trait]
impl ScheduleRepository for PgScheduleRepository {
    async fn find_by_uuid(&self, uuid: Uuid) -> ScheduleResult<Option<DetailedSchedule>> {
        get_schedule_by_uuid(&self.pool, uuid)
            .await
            .map_err(into_schedule_error)?
            .map(into_detailed)
            .transpose()
    }

    async fn find_by_field_date_and_slot(
        &self,
        field_id: i64,
        date: NaiveDate,
        time_id: i64,
    ) -> ScheduleResult<Option<Schedule>> {
        get_schedule_by_field_date_and_time(&self.pool, field_id, date, time_id)
            .await
            .map_err(into_schedule_error)?
            .map(|row| Schedule::try_from(row).map_err(ScheduleError::Persistence))
            .transpose()
    }

    async fn find_all_paginated(
        &self,
        params: ScheduleListParams,
    ) -> ScheduleResult<(Vec<DetailedSchedule>, i64)> {
        let (rows, total) = get_schedules_paginated(&self.pool, params)
            .await
            .map_err(into_schedule_error)?;
        let schedules = rows
            .into_iter()
            .map(into_detailed)
            .collect::<ScheduleResult<Vec<_>>>()?;

        Ok((schedules, total))
    }

    async fn find_all_by_field_and_date(
        &self,
        field_id: i64,
        date: NaiveDate,
    ) -> ScheduleResult<Vec<DetailedSchedule>> {
        get_schedules_by_field_and_date(&self.pool, field_id, date)
            .await
            .map_err(into_schedule_error)?
            .into_iter()
            .map(into_detailed)
            .collect()
    }

    async fn create_batch(&self, schedules: Vec<NewSchedule>) -> ScheduleResult<()> {
        create_schedules(&self.pool, &schedules)
            .await
            .map_err(into_schedule_error)
    }

    async fn update_fields(
        &self,
        uuid: Uuid,
        patch: SchedulePatch,
    ) -> ScheduleResult<DetailedSchedule> {
        let row = update_schedule(&self.pool, uuid, patch.date, patch.time_id)
            .await
            .map_err(into_schedule_error)?
            .ok_or_else(|| ScheduleError::schedule_not_found(uuid))?;

        into_detailed(row)
    }

    async fn update_status(&self, uuid: Uuid, status: ScheduleStatus) -> ScheduleResult<()> {
        let updated = update_schedule_status(&self.pool, uuid, status)
            .await
            .map_err(into_schedule_error)?;

        if updated {
            Ok(())
        } else {
            Err(ScheduleError::schedule_not_found(uuid))
        }
    }

    async fn delete(&self, uuid: Uuid) -> ScheduleResult<()> {
        let deleted = delete_schedule(&self.pool, uuid)
            .await
            .map_err(into_schedule_error)?;

        if deleted {
            Ok(())
        } else {
            Err(ScheduleError::schedule_not_found(uuid))
        }
    }
}
