use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::{
    errors::{ScheduleError, ScheduleResult},
    format::parse_time,
    models::time_slot::{CreateTimeSlotRequest, NewTimeSlot, TimeSlotResponse},
    repository::TimeSlotRepository,
};

/// Read and extend the shared catalog of daily time windows.
#[derive(Clone)]
pub struct TimeSlotService {
    time_slots: Arc<dyn TimeSlotRepository>,
}

impl TimeSlotService {
    pub fn new(time_slots: Arc<dyn TimeSlotRepository>) -> Self {
        Self { time_slots }
    }

    pub async fn get_all(&self) -> ScheduleResult<Vec<TimeSlotResponse>> {
        let slots = self.time_slots.find_all().await?;
        Ok(slots.into_iter().map(TimeSlotResponse::from).collect())
    }

    pub async fn get_by_uuid(&self, uuid: Uuid) -> ScheduleResult<TimeSlotResponse> {
        self.time_slots
            .find_by_uuid(uuid)
            .await?
            .map(TimeSlotResponse::from)
            .ok_or_else(|| ScheduleError::time_slot_not_found(uuid))
    }

    pub async fn create(&self, request: CreateTimeSlotRequest) -> ScheduleResult<TimeSlotResponse> {
        let start_time = parse_time(&request.start_time)?;
        let end_time = parse_time(&request.end_time)?;
        if end_time <= start_time {
            return Err(ScheduleError::InvalidInput(format!(
                "End time {} must be after start time {}",
                end_time, start_time
            )));
        }

        let slot = self
            .time_slots
            .create(NewTimeSlot {
                uuid: Uuid::new_v4(),
                start_time,
                end_time,
            })
            .await?;
        info!(time_slot = %slot.uuid, label = %slot.label(), "Created time slot");

        Ok(slot.into())
    }
}
