use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    errors::{ScheduleError, ScheduleResult},
    models::schedule::Schedule,
    repository::ScheduleRepository,
};

/// Answers whether a `(field, date, time slot)` triple is already occupied.
#[derive(Clone)]
pub struct ConflictChecker {
    schedules: Arc<dyn ScheduleRepository>,
}

impl ConflictChecker {
    pub fn new(schedules: Arc<dyn ScheduleRepository>) -> Self {
        Self { schedules }
    }

    /// Pure lookup. Storage failures propagate; they never read as "absent".
    pub async fn find_conflict(
        &self,
        field_id: i64,
        date: NaiveDate,
        time_id: i64,
    ) -> ScheduleResult<Option<Schedule>> {
        debug!(field_id, %date, time_id, "Checking for schedule conflict");
        self.schedules
            .find_by_field_date_and_slot(field_id, date, time_id)
            .await
    }

    /// Fails with `ScheduleAlreadyExists` when the triple is taken by any
    /// schedule other than `owner`.
    pub async fn ensure_free(
        &self,
        field_id: i64,
        date: NaiveDate,
        time_id: i64,
        owner: Option<Uuid>,
    ) -> ScheduleResult<()> {
        match self.find_conflict(field_id, date, time_id).await? {
            Some(existing) if Some(existing.uuid) != owner => {
                warn!(
                    field_id,
                    %date,
                    time_id,
                    existing = %existing.uuid,
                    "Field schedule already exists"
                );
                Err(ScheduleError::ScheduleAlreadyExists)
            }
            _ => Ok(()),
        }
    }
}
