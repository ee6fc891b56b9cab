use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::{eyre, Result};
use fieldsched_core::models::{
    field::Field,
    schedule::{DetailedSchedule, Schedule, ScheduleStatus},
    time_slot::TimeSlot,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbField {
    pub id: i64,
    pub uuid: Uuid,
    pub code: String,
    pub name: String,
    pub price_per_hour: i64,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: i64,
    pub uuid: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSchedule {
    pub id: i64,
    pub uuid: Uuid,
    pub field_id: i64,
    pub time_id: i64,
    pub date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `field_schedules` row joined with its field and time slot.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDetailedSchedule {
    pub id: i64,
    pub uuid: Uuid,
    pub field_id: i64,
    pub time_id: i64,
    pub date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub field_name: String,
    pub price_per_hour: i64,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<DbField> for Field {
    fn from(row: DbField) -> Self {
        Self {
            id: row.id,
            uuid: row.uuid,
            code: row.code,
            name: row.name,
            price_per_hour: row.price_per_hour,
            images: row.images,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbTimeSlot> for TimeSlot {
    fn from(row: DbTimeSlot) -> Self {
        Self {
            id: row.id,
            uuid: row.uuid,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn parse_status(raw: &str) -> Result<ScheduleStatus> {
    raw.parse()
        .map_err(|_| eyre!("Unexpected field schedule status in storage: {}", raw))
}

impl TryFrom<DbSchedule> for Schedule {
    type Error = eyre::Report;

    fn try_from(row: DbSchedule) -> Result<Self> {
        Ok(Self {
            id: row.id,
            uuid: row.uuid,
            field_id: row.field_id,
            time_id: row.time_id,
            date: row.date,
            status: parse_status(&row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<DbDetailedSchedule> for DetailedSchedule {
    type Error = eyre::Report;

    fn try_from(row: DbDetailedSchedule) -> Result<Self> {
        Ok(Self {
            schedule: Schedule {
                id: row.id,
                uuid: row.uuid,
                field_id: row.field_id,
                time_id: row.time_id,
                date: row.date,
                status: parse_status(&row.status)?,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            field_name: row.field_name,
            price_per_hour: row.price_per_hour,
            start_time: row.start_time,
            end_time: row.end_time,
        })
    }
}
