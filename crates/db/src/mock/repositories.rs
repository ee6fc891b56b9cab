use async_trait::async_trait;
use chrono::NaiveDate;
use fieldsched_core::{
    errors::ScheduleResult,
    models::{
        field::{Field, FieldListParams, FieldPatch, NewField},
        schedule::{
            DetailedSchedule, NewSchedule, Schedule, ScheduleListParams, SchedulePatch,
            ScheduleStatus,
        },
        time_slot::{NewTimeSlot, TimeSlot},
    },
    repository::{FieldRepository, ScheduleRepository, TimeSlotRepository},
};
use mockall::mock;
use uuid::Uuid;

// Mock repositories for testing
mock! {
    pub FieldRepo {}

    #[async_trait]
    impl FieldRepository for FieldRepo {
        async fn find_all_paginated(
            &self,
            params: FieldListParams,
        ) -> ScheduleResult<(Vec<Field>, i64)>;

        async fn find_all(&self) -> ScheduleResult<Vec<Field>>;

        async fn find_by_uuid(&self, uuid: Uuid) -> ScheduleResult<Option<Field>>;

        async fn create(&self, field: NewField) -> ScheduleResult<Field>;

        async fn update(&self, uuid: Uuid, patch: FieldPatch) -> ScheduleResult<Field>;

        async fn delete(&self, uuid: Uuid) -> ScheduleResult<()>;
    }
}

mock! {
    pub TimeSlotRepo {}

    #[async_trait]
    impl TimeSlotRepository for TimeSlotRepo {
        async fn find_all(&self) -> ScheduleResult<Vec<TimeSlot>>;

        async fn find_by_uuid(&self, uuid: Uuid) -> ScheduleResult<Option<TimeSlot>>;

        async fn create(&self, slot: NewTimeSlot) -> ScheduleResult<TimeSlot>;
    }
}

mock! {
    pub ScheduleRepo {}

    #[async_trait]
    impl ScheduleRepository for ScheduleRepo {
        async fn find_by_uuid(&self, uuid: Uuid) -> ScheduleResult<Option<DetailedSchedule>>;

        async fn find_by_field_date_and_slot(
            &self,
            field_id: i64,
            date: NaiveDate,
            time_id: i64,
        ) -> ScheduleResult<Option<Schedule>>;

        async fn find_all_paginated(
            &self,
            params: ScheduleListParams,
        ) -> ScheduleResult<(Vec<DetailedSchedule>, i64)>;

        async fn find_all_by_field_and_date(
            &self,
            field_id: i64,
            date: NaiveDate,
        ) -> ScheduleResult<Vec<DetailedSchedule>>;

        async fn create_batch(&self, schedules: Vec<NewSchedule>) -> ScheduleResult<()>;

        async fn update_fields(
            &self,
            uuid: Uuid,
            patch: SchedulePatch,
        ) -> ScheduleResult<DetailedSchedule>;

        async fn update_status(&self, uuid: Uuid, status: ScheduleStatus) -> ScheduleResult<()>;

        async fn delete(&self, uuid: Uuid) -> ScheduleResult<()>;
    }
}
