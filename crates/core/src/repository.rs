//! Persistence contract consumed by the scheduling services.
//!
//! Implementations must report storage failures as
//! [`ScheduleError::Persistence`](crate::errors::ScheduleError::Persistence)
//! and must never collapse a failed lookup into "absent". A write that would
//! place a second schedule on an occupied `(field, date, time slot)` triple
//! must fail with
//! [`ScheduleError::ScheduleAlreadyExists`](crate::errors::ScheduleError::ScheduleAlreadyExists).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::errors::ScheduleResult;
use crate::models::{
    field::{Field, FieldListParams, FieldPatch, NewField},
    schedule::{
        DetailedSchedule, NewSchedule, Schedule, ScheduleListParams, SchedulePatch,
        ScheduleStatus,
    },
    time_slot::{NewTimeSlot, TimeSlot},
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait FieldRepository: Send + Sync {
    /// One page of fields plus the total row count.
    async fn find_all_paginated(
        &self,
        params: FieldListParams,
    ) -> ScheduleResult<(Vec<Field>, i64)>;

    /// Every field, oldest first.
    async fn find_all(&self) -> ScheduleResult<Vec<Field>>;

    async fn find_by_uuid(&self, uuid: Uuid) -> ScheduleResult<Option<Field>>;

    /// Fails with `FieldCodeAlreadyExists` when the code is taken.
    async fn create(&self, field: NewField) -> ScheduleResult<Field>;

    async fn update(&self, uuid: Uuid, patch: FieldPatch) -> ScheduleResult<Field>;

    async fn delete(&self, uuid: Uuid) -> ScheduleResult<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TimeSlotRepository: Send + Sync {
    /// Every slot in the catalog, earliest start first.
    async fn find_all(&self) -> ScheduleResult<Vec<TimeSlot>>;

    async fn find_by_uuid(&self, uuid: Uuid) -> ScheduleResult<Option<TimeSlot>>;

    async fn create(&self, slot: NewTimeSlot) -> ScheduleResult<TimeSlot>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn find_by_uuid(&self, uuid: Uuid) -> ScheduleResult<Option<DetailedSchedule>>;

    async fn find_by_field_date_and_slot(
        &self,
        field_id: i64,
        date: NaiveDate,
        time_id: i64,
    ) -> ScheduleResult<Option<Schedule>>;

    /// One page of schedules plus the total row count.
    async fn find_all_paginated(
        &self,
        params: ScheduleListParams,
    ) -> ScheduleResult<(Vec<DetailedSchedule>, i64)>;

    /// Schedules of one field on one date, earliest slot first.
    async fn find_all_by_field_and_date(
        &self,
        field_id: i64,
        date: NaiveDate,
    ) -> ScheduleResult<Vec<DetailedSchedule>>;

    /// Inserts the whole batch in a single transaction: all rows or none.
    async fn create_batch(&self, schedules: Vec<NewSchedule>) -> ScheduleResult<()>;

    async fn update_fields(
        &self,
        uuid: Uuid,
        patch: SchedulePatch,
    ) -> ScheduleResult<DetailedSchedule>;

    async fn update_status(&self, uuid: Uuid, status: ScheduleStatus) -> ScheduleResult<()>;

    async fn delete(&self, uuid: Uuid) -> ScheduleResult<()>;
}

/// The set of repositories a service is wired with.
#[derive(Clone)]
pub struct Repositories {
    pub fields: Arc<dyn FieldRepository>,
    pub time_slots: Arc<dyn TimeSlotRepository>,
    pub schedules: Arc<dyn ScheduleRepository>,
}
