use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ScheduleError;
use crate::models::pagination::page_offset;
use crate::models::time_slot::time_label;

/// Lifecycle state of a field schedule.
///
/// Generation and manual creation produce `Available`; only an explicit
/// status update moves a schedule to `Booked`. There is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScheduleStatus {
    #[default]
    Available,
    Booked,
}

impl ScheduleStatus {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Available => "available",
            ScheduleStatus::Booked => "booked",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleStatus::Available => f.write_str("Available"),
            ScheduleStatus::Booked => f.write_str("Booked"),
        }
    }
}

impl FromStr for ScheduleStatus {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "available" => Ok(ScheduleStatus::Available),
            "booked" => Ok(ScheduleStatus::Booked),
            other => Err(ScheduleError::InvalidInput(format!(
                "Unknown schedule status: {}",
                other
            ))),
        }
    }
}

/// One bookable instance of a field at a date and time slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    pub uuid: Uuid,
    pub field_id: i64,
    pub time_id: i64,
    pub date: NaiveDate,
    pub status: ScheduleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A schedule joined with the field and time slot it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedSchedule {
    pub schedule: Schedule,
    pub field_name: String,
    pub price_per_hour: i64,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// A schedule row that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSchedule {
    pub uuid: Uuid,
    pub field_id: i64,
    pub time_id: i64,
    pub date: NaiveDate,
    pub status: ScheduleStatus,
}

impl NewSchedule {
    pub fn available(field_id: i64, time_id: i64, date: NaiveDate) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            field_id,
            time_id,
            date,
            status: ScheduleStatus::Available,
        }
    }
}

/// Rebinding applied by a point update. Status and field stay untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulePatch {
    pub date: NaiveDate,
    pub time_id: i64,
}

/// Columns a schedule listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    Id,
    Date,
    Status,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Date => "date",
            SortColumn::Status => "status",
            SortColumn::CreatedAt => "created_at",
            SortColumn::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for SortColumn {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortColumn::Id),
            "date" => Ok(SortColumn::Date),
            "status" => Ok(SortColumn::Status),
            "created_at" => Ok(SortColumn::CreatedAt),
            "updated_at" => Ok(SortColumn::UpdatedAt),
            other => Err(ScheduleError::InvalidInput(format!(
                "Unsupported sort column: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ScheduleError::InvalidInput(format!(
                "Unsupported sort order: {}",
                other
            ))),
        }
    }
}

/// Validated listing parameters handed to the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleListParams {
    pub page: i64,
    pub limit: i64,
    pub sort_column: SortColumn,
    pub sort_order: SortOrder,
}

impl ScheduleListParams {
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateFieldScheduleForOneMonthRequest {
    pub field_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldScheduleRequest {
    pub field_id: Uuid,
    pub date: String,
    pub time_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFieldScheduleRequest {
    pub date: String,
    pub time_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusFieldScheduleRequest {
    pub field_schedule_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldScheduleRequestParam {
    pub page: i64,
    pub limit: i64,
    pub sort_column: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldScheduleResponse {
    pub uuid: Uuid,
    pub field_name: String,
    pub price_per_hour: i64,
    pub date: String,
    pub status: String,
    pub time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DetailedSchedule> for FieldScheduleResponse {
    fn from(detail: DetailedSchedule) -> Self {
        Self {
            uuid: detail.schedule.uuid,
            field_name: detail.field_name,
            price_per_hour: detail.price_per_hour,
            date: detail.schedule.date.format("%Y-%m-%d").to_string(),
            status: detail.schedule.status.to_string(),
            time: time_label(detail.start_time, detail.end_time),
            created_at: detail.schedule.created_at,
            updated_at: detail.schedule.updated_at,
        }
    }
}

/// Row shown by a booking UI listing one field's slots on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldScheduleForBookingResponse {
    pub uuid: Uuid,
    pub time: String,
    pub date: String,
    pub status: String,
    pub price_per_hour: String,
}
