use async_trait::async_trait;
use chrono::{NaiveTime, Utc};
use eyre::Result;
use fieldsched_core::{
    errors::ScheduleResult,
    models::time_slot::{NewTimeSlot, TimeSlot},
    repository::TimeSlotRepository,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{error::into_schedule_error, models::DbTimeSlot};

pub async fn create_time_slot(
    pool: &Pool<Postgres>,
    uuid: Uuid,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<DbTimeSlot> {
    let now = Utc::now();

    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        INSERT INTO times (uuid, start_time, end_time, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $4)
        RETURNING id, uuid, start_time, end_time, created_at, updated_at
        "#,
    )
    .bind(uuid)
    .bind(start_time)
    .bind(end_time)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(time_slot)
}

pub async fn get_time_slots(pool: &Pool<Postgres>) -> Result<Vec<DbTimeSlot>> {
    let time_slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, uuid, start_time, end_time, created_at, updated_at
        FROM times
        ORDER BY start_time ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(time_slots)
}

pub async fn get_time_slot_by_uuid(
    pool: &Pool<Postgres>,
    uuid: Uuid,
) -> Result<Option<DbTimeSlot>> {
    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, uuid, start_time, end_time, created_at, updated_at
        FROM times
        WHERE uuid = $1
        "#,
    )
    .bind(uuid)
    .fetch_optional(pool)
    .await?;

    Ok(time_slot)
}

pub struct PgTimeSlotRepository {
    pool: Pool<Postgres>,
}

impl PgTimeSlotRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimeSlotRepository for PgTimeSlotRepository {
    async fn find_all(&self) -> ScheduleResult<Vec<TimeSlot>> {
        let slots = get_time_slots(&self.pool)
            .await
            .map_err(into_schedule_error)?;

        Ok(slots.into_iter().map(TimeSlot::from).collect())
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> ScheduleResult<Option<TimeSlot>> {
        let slot = get_time_slot_by_uuid(&self.pool, uuid)
            .await
            .map_err(into_schedule_error)?;

        Ok(slot.map(TimeSlot::from))
    }

    async fn create(&self, slot: NewTimeSlot) -> ScheduleResult<TimeSlot> {
        let created = create_time_slot(&self.pool, slot.uuid, slot.start_time, slot.end_time)
            .await
            .map_err(into_schedule_error)?;

        Ok(created.into())
    }
}
