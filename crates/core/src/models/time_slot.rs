use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A daily time window shared by every field and every date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: i64,
    pub uuid: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TimeSlot {
    /// Renders the window as `HH:MM:SS - HH:MM:SS`.
    pub fn label(&self) -> String {
        time_label(self.start_time, self.end_time)
    }
}

pub fn time_label(start: NaiveTime, end: NaiveTime) -> String {
    format!("{} - {}", start, end)
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTimeSlot {
    pub uuid: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimeSlotRequest {
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlotResponse {
    pub uuid: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TimeSlot> for TimeSlotResponse {
    fn from(slot: TimeSlot) -> Self {
        Self {
            uuid: slot.uuid,
            start_time: slot.start_time,
            end_time: slot.end_time,
            created_at: slot.created_at,
            updated_at: slot.updated_at,
        }
    }
}
