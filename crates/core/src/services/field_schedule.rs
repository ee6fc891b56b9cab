//! # Field Schedule Service
//!
//! Owns the rules around bookable field schedules:
//!
//! - month generation: tomorrow plus the following days, crossed with the whole
//!   time slot catalog, committed as one batch or not at all
//! - manual creation of caller-chosen slots on a single date, same all-or-nothing policy
//! - point updates that rebind a schedule to another date or slot
//! - the `Available` → `Booked` status transition
//! - listing and lookup views
//!
//! Every write path consults the [`ConflictChecker`] before writing. The
//! repository's uniqueness guarantee on `(field, date, time slot)` closes the
//! window between that check and the write under concurrent callers.

use std::collections::HashSet;

use chrono::{Days, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    errors::{ScheduleError, ScheduleResult},
    format::{format_day_month, format_price, parse_date, CurrencyStyle, MonthLocale},
    models::{
        field::Field,
        pagination::{check_page, PaginationResult},
        schedule::{
            FieldScheduleForBookingResponse, FieldScheduleRequest, FieldScheduleRequestParam,
            FieldScheduleResponse, GenerateFieldScheduleForOneMonthRequest, NewSchedule,
            ScheduleListParams, SchedulePatch, ScheduleStatus, SortColumn, SortOrder,
            UpdateFieldScheduleRequest, UpdateStatusFieldScheduleRequest,
        },
        time_slot::{time_label, TimeSlot},
    },
    repository::Repositories,
    services::conflict::ConflictChecker,
};

/// Number of consecutive days covered by a month generation.
pub const GENERATION_DAYS: u64 = 30;

/// Knobs that shape generation and presentation.
#[derive(Debug, Clone)]
pub struct ScheduleSettings {
    /// Zone whose calendar defines "today".
    pub timezone: Tz,
    pub generation_days: u64,
    pub month_locale: MonthLocale,
    pub currency: CurrencyStyle,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Asia::Jakarta,
            generation_days: GENERATION_DAYS,
            month_locale: MonthLocale::default(),
            currency: CurrencyStyle::default(),
        }
    }
}

#[derive(Clone)]
pub struct FieldScheduleService {
    repositories: Repositories,
    conflicts: ConflictChecker,
    settings: ScheduleSettings,
}

impl FieldScheduleService {
    pub fn new(repositories: Repositories, settings: ScheduleSettings) -> Self {
        let conflicts = ConflictChecker::new(repositories.schedules.clone());
        Self {
            repositories,
            conflicts,
            settings,
        }
    }

    /// Today's date in the configured zone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.settings.timezone).date_naive()
    }

    pub async fn get_all_with_pagination(
        &self,
        param: FieldScheduleRequestParam,
    ) -> ScheduleResult<PaginationResult<FieldScheduleResponse>> {
        let params = list_params(&param)?;
        let (rows, total) = self
            .repositories
            .schedules
            .find_all_paginated(params)
            .await?;

        let data = rows.into_iter().map(FieldScheduleResponse::from).collect();
        Ok(PaginationResult::new(data, total, params.page, params.limit))
    }

    /// Every schedule of one field on one date, labelled for a booking view.
    pub async fn get_all_by_field_id_and_date(
        &self,
        field_id: Uuid,
        date: &str,
    ) -> ScheduleResult<Vec<FieldScheduleForBookingResponse>> {
        let field = self.find_field(field_id).await?;
        let date = parse_date(date)?;

        let rows = self
            .repositories
            .schedules
            .find_all_by_field_and_date(field.id, date)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| FieldScheduleForBookingResponse {
                uuid: row.schedule.uuid,
                time: time_label(row.start_time, row.end_time),
                date: format_day_month(row.schedule.date, self.settings.month_locale),
                status: row.schedule.status.to_string(),
                price_per_hour: format_price(row.price_per_hour, &self.settings.currency),
            })
            .collect())
    }

    pub async fn get_by_uuid(&self, uuid: Uuid) -> ScheduleResult<FieldScheduleResponse> {
        let schedule = self
            .repositories
            .schedules
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| ScheduleError::schedule_not_found(uuid))?;

        Ok(schedule.into())
    }

    /// Opens the whole slot catalog for the configured number of days starting
    /// tomorrow. Returns how many schedules were created.
    pub async fn generate_schedule_for_one_month(
        &self,
        request: GenerateFieldScheduleForOneMonthRequest,
    ) -> ScheduleResult<usize> {
        let tomorrow = self
            .today()
            .checked_add_days(Days::new(1))
            .ok_or_else(|| ScheduleError::InvalidInput("Date out of range".to_string()))?;

        self.generate_schedule_from(request.field_id, tomorrow).await
    }

    /// Generation with an explicit first day.
    ///
    /// Candidates are checked one at a time and the first occupied
    /// `(date, slot)` aborts the run before anything is written.
    pub async fn generate_schedule_from(
        &self,
        field_id: Uuid,
        start: NaiveDate,
    ) -> ScheduleResult<usize> {
        let field = self.find_field(field_id).await?;
        let times = self.repositories.time_slots.find_all().await?;

        let days = self.settings.generation_days;
        let mut batch = Vec::with_capacity(days as usize * times.len());
        for offset in 0..days {
            let date = start
                .checked_add_days(Days::new(offset))
                .ok_or_else(|| ScheduleError::InvalidInput("Date out of range".to_string()))?;

            for slot in &times {
                self.conflicts
                    .ensure_free(field.id, date, slot.id, None)
                    .await?;
                batch.push(NewSchedule::available(field.id, slot.id, date));
            }
        }

        if batch.is_empty() {
            debug!(field = %field.uuid, "Time slot catalog is empty, nothing to generate");
            return Ok(0);
        }

        let count = batch.len();
        self.repositories.schedules.create_batch(batch).await?;
        info!(
            field = %field.uuid,
            %start,
            days,
            count,
            "Generated field schedules"
        );

        Ok(count)
    }

    /// Opens the requested slots on a single date.
    pub async fn create(&self, request: FieldScheduleRequest) -> ScheduleResult<usize> {
        if request.time_ids.is_empty() {
            return Err(ScheduleError::InvalidInput(
                "At least one time slot is required".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(request.time_ids.len());
        if let Some(duplicate) = request.time_ids.iter().find(|id| !seen.insert(**id)) {
            return Err(ScheduleError::InvalidInput(format!(
                "Time slot {} requested more than once",
                duplicate
            )));
        }
        let date = parse_date(&request.date)?;

        let field = self.find_field(request.field_id).await?;

        let mut batch = Vec::with_capacity(request.time_ids.len());
        for time_id in request.time_ids {
            let slot = self.find_time_slot(time_id).await?;
            self.conflicts
                .ensure_free(field.id, date, slot.id, None)
                .await?;
            batch.push(NewSchedule::available(field.id, slot.id, date));
        }

        let count = batch.len();
        self.repositories.schedules.create_batch(batch).await?;
        info!(field = %field.uuid, %date, count, "Created field schedules");

        Ok(count)
    }

    /// Moves a schedule to another date and/or time slot.
    pub async fn update(
        &self,
        uuid: Uuid,
        request: UpdateFieldScheduleRequest,
    ) -> ScheduleResult<FieldScheduleResponse> {
        let date = parse_date(&request.date)?;
        let current = self
            .repositories
            .schedules
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| ScheduleError::schedule_not_found(uuid))?;
        let slot = self.find_time_slot(request.time_id).await?;

        self.conflicts
            .ensure_free(current.schedule.field_id, date, slot.id, Some(uuid))
            .await?;

        let updated = self
            .repositories
            .schedules
            .update_fields(
                uuid,
                SchedulePatch {
                    date,
                    time_id: slot.id,
                },
            )
            .await?;
        info!(schedule = %uuid, %date, time = %slot.uuid, "Updated field schedule");

        Ok(updated.into())
    }

    /// Marks each schedule `Booked`, one at a time.
    ///
    /// Not atomic across the list: when an identity fails, the ones before it
    /// stay booked, the ones after it are untouched, and the error names the
    /// failing identity. Re-booking a booked schedule is a plain rewrite.
    pub async fn update_status(
        &self,
        request: UpdateStatusFieldScheduleRequest,
    ) -> ScheduleResult<()> {
        if request.field_schedule_ids.is_empty() {
            return Err(ScheduleError::InvalidInput(
                "At least one field schedule is required".to_string(),
            ));
        }

        for uuid in request.field_schedule_ids {
            self.repositories
                .schedules
                .find_by_uuid(uuid)
                .await?
                .ok_or_else(|| ScheduleError::schedule_not_found(uuid))?;

            self.repositories
                .schedules
                .update_status(uuid, ScheduleStatus::Booked)
                .await?;
            debug!(schedule = %uuid, "Field schedule booked");
        }

        Ok(())
    }

    pub async fn delete(&self, uuid: Uuid) -> ScheduleResult<()> {
        self.repositories
            .schedules
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| ScheduleError::schedule_not_found(uuid))?;

        self.repositories.schedules.delete(uuid).await?;
        info!(schedule = %uuid, "Deleted field schedule");
        Ok(())
    }

    async fn find_field(&self, uuid: Uuid) -> ScheduleResult<Field> {
        self.repositories
            .fields
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| ScheduleError::field_not_found(uuid))
    }

    async fn find_time_slot(&self, uuid: Uuid) -> ScheduleResult<TimeSlot> {
        self.repositories
            .time_slots
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| ScheduleError::time_slot_not_found(uuid))
    }
}

fn list_params(param: &FieldScheduleRequestParam) -> ScheduleResult<ScheduleListParams> {
    check_page(param.page, param.limit)?;

    let (sort_column, sort_order) = match &param.sort_column {
        Some(column) => (
            column.parse::<SortColumn>()?,
            param
                .sort_order
                .as_deref()
                .map(str::parse::<SortOrder>)
                .transpose()?
                .unwrap_or(SortOrder::Asc),
        ),
        None => (SortColumn::CreatedAt, SortOrder::Desc),
    };

    Ok(ScheduleListParams {
        page: param.page,
        limit: param.limit,
        sort_column,
        sort_order,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::{NaiveTime, Utc};
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::schedule::{DetailedSchedule, Schedule};
    use crate::repository::{MockFieldRepository, MockScheduleRepository, MockTimeSlotRepository};

    const FIELD_ID: i64 = 11;

    struct Mocks {
        fields: MockFieldRepository,
        time_slots: MockTimeSlotRepository,
        schedules: MockScheduleRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                fields: MockFieldRepository::new(),
                time_slots: MockTimeSlotRepository::new(),
                schedules: MockScheduleRepository::new(),
            }
        }

        fn with_field(mut self, field: Field) -> Self {
            self.fields
                .expect_find_by_uuid()
                .with(eq(field.uuid))
                .returning(move |_| Ok(Some(field.clone())));
            self
        }

        fn into_service(self) -> FieldScheduleService {
            FieldScheduleService::new(
                Repositories {
                    fields: Arc::new(self.fields),
                    time_slots: Arc::new(self.time_slots),
                    schedules: Arc::new(self.schedules),
                },
                ScheduleSettings::default(),
            )
        }
    }

    fn field() -> Field {
        let now = Utc::now();
        Field {
            id: FIELD_ID,
            uuid: Uuid::new_v4(),
            code: "FLD-01".to_string(),
            name: "Lapangan Futsal A".to_string(),
            price_per_hour: 120_000,
            images: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    fn slot(id: i64, hour: u32) -> TimeSlot {
        let now = Utc::now();
        TimeSlot {
            id,
            uuid: Uuid::new_v4(),
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn schedule(id: i64, time_id: i64, on: NaiveDate, status: ScheduleStatus) -> Schedule {
        let now = Utc::now();
        Schedule {
            id,
            uuid: Uuid::new_v4(),
            field_id: FIELD_ID,
            time_id,
            date: on,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn detailed(schedule: Schedule) -> DetailedSchedule {
        DetailedSchedule {
            schedule,
            field_name: "Lapangan Futsal A".to_string(),
            price_per_hour: 120_000,
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_generate_creates_every_date_slot_pair_once() {
        let field = field();
        let field_uuid = field.uuid;
        let start = date(2025, 3, 1);
        let captured: Arc<Mutex<Vec<NewSchedule>>> = Arc::default();

        let mut mocks = Mocks::new().with_field(field);
        mocks
            .time_slots
            .expect_find_all()
            .times(1)
            .returning(|| Ok(vec![slot(1, 8), slot(2, 9), slot(3, 10)]));
        mocks
            .schedules
            .expect_find_by_field_date_and_slot()
            .times(90)
            .returning(|_, _, _| Ok(None));
        let sink = captured.clone();
        mocks
            .schedules
            .expect_create_batch()
            .times(1)
            .returning(move |batch| {
                *sink.lock().unwrap() = batch;
                Ok(())
            });

        let count = mocks
            .into_service()
            .generate_schedule_from(field_uuid, start)
            .await
            .unwrap();

        let batch = captured.lock().unwrap();
        assert_eq!(count, 90);
        assert_eq!(batch.len(), 90);
        assert!(batch.iter().all(|s| s.status == ScheduleStatus::Available));
        assert!(batch.iter().all(|s| s.field_id == FIELD_ID));

        let pairs: HashSet<(NaiveDate, i64)> = batch.iter().map(|s| (s.date, s.time_id)).collect();
        assert_eq!(pairs.len(), 90);

        let first = batch.iter().map(|s| s.date).min().unwrap();
        let last = batch.iter().map(|s| s.date).max().unwrap();
        assert_eq!(first, start);
        assert_eq!(last, date(2025, 3, 30));

        let uuids: HashSet<Uuid> = batch.iter().map(|s| s.uuid).collect();
        assert_eq!(uuids.len(), 90);
    }

    #[tokio::test]
    async fn test_generate_stops_at_first_collision_without_writing() {
        let field = field();
        let field_uuid = field.uuid;
        let start = date(2025, 3, 1);
        let taken_day = date(2025, 3, 2);

        let mut mocks = Mocks::new().with_field(field);
        mocks
            .time_slots
            .expect_find_all()
            .returning(|| Ok(vec![slot(1, 8), slot(2, 9)]));
        // Day one: both free. Day two: slot 1 free, slot 2 taken.
        mocks
            .schedules
            .expect_find_by_field_date_and_slot()
            .times(4)
            .returning(move |_, on, time_id| {
                if on == taken_day && time_id == 2 {
                    Ok(Some(schedule(99, 2, on, ScheduleStatus::Available)))
                } else {
                    Ok(None)
                }
            });
        mocks.schedules.expect_create_batch().never();

        let result = mocks
            .into_service()
            .generate_schedule_from(field_uuid, start)
            .await;

        assert!(matches!(result, Err(ScheduleError::ScheduleAlreadyExists)));
    }

    #[tokio::test]
    async fn test_generate_unknown_field() {
        let mut mocks = Mocks::new();
        mocks.fields.expect_find_by_uuid().returning(|_| Ok(None));
        mocks.time_slots.expect_find_all().never();
        mocks.schedules.expect_create_batch().never();

        let result = mocks
            .into_service()
            .generate_schedule_from(Uuid::new_v4(), date(2025, 3, 1))
            .await;

        assert!(matches!(result, Err(ScheduleError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_generate_propagates_lookup_failure() {
        let field = field();
        let field_uuid = field.uuid;

        let mut mocks = Mocks::new().with_field(field);
        mocks
            .time_slots
            .expect_find_all()
            .returning(|| Ok(vec![slot(1, 8)]));
        mocks
            .schedules
            .expect_find_by_field_date_and_slot()
            .times(1)
            .returning(|_, _, _| Err(ScheduleError::Persistence(eyre::eyre!("timeout"))));
        mocks.schedules.expect_create_batch().never();

        let result = mocks
            .into_service()
            .generate_schedule_from(field_uuid, date(2025, 3, 1))
            .await;

        assert!(matches!(result, Err(ScheduleError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_generate_with_empty_catalog_writes_nothing() {
        let field = field();
        let field_uuid = field.uuid;

        let mut mocks = Mocks::new().with_field(field);
        mocks.time_slots.expect_find_all().returning(|| Ok(vec![]));
        mocks.schedules.expect_create_batch().never();

        let count = mocks
            .into_service()
            .generate_schedule_from(field_uuid, date(2025, 3, 1))
            .await
            .unwrap();

        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_generate_for_one_month_starts_tomorrow() {
        let field = field();
        let field_uuid = field.uuid;
        let captured: Arc<Mutex<Vec<NewSchedule>>> = Arc::default();

        let mut mocks = Mocks::new().with_field(field);
        mocks
            .time_slots
            .expect_find_all()
            .returning(|| Ok(vec![slot(1, 8)]));
        mocks
            .schedules
            .expect_find_by_field_date_and_slot()
            .returning(|_, _, _| Ok(None));
        let sink = captured.clone();
        mocks
            .schedules
            .expect_create_batch()
            .times(1)
            .returning(move |batch| {
                *sink.lock().unwrap() = batch;
                Ok(())
            });

        let service = mocks.into_service();
        let count = service
            .generate_schedule_for_one_month(GenerateFieldScheduleForOneMonthRequest {
                field_id: field_uuid,
            })
            .await
            .unwrap();

        let batch = captured.lock().unwrap();
        let earliest = batch.iter().map(|s| s.date).min().unwrap();
        assert_eq!(count, GENERATION_DAYS as usize);
        // The run may straddle midnight; tomorrow is at least today + 1.
        assert!(earliest > service.today() - Days::new(1));
        assert!(earliest <= service.today() + Days::new(1));
    }

    #[tokio::test]
    async fn test_create_rejects_whole_request_on_collision() {
        let field = field();
        let field_uuid = field.uuid;
        let on = date(2025, 3, 1);
        let t1 = slot(1, 8);
        let t2 = slot(2, 9);
        let (t1_uuid, t2_uuid) = (t1.uuid, t2.uuid);

        let mut mocks = Mocks::new().with_field(field);
        mocks
            .time_slots
            .expect_find_by_uuid()
            .with(eq(t1_uuid))
            .returning(move |_| Ok(Some(t1.clone())));
        mocks
            .time_slots
            .expect_find_by_uuid()
            .with(eq(t2_uuid))
            .returning(move |_| Ok(Some(t2.clone())));
        mocks
            .schedules
            .expect_find_by_field_date_and_slot()
            .with(eq(FIELD_ID), eq(on), eq(1))
            .returning(|_, _, _| Ok(None));
        mocks
            .schedules
            .expect_find_by_field_date_and_slot()
            .with(eq(FIELD_ID), eq(on), eq(2))
            .returning(move |_, _, _| Ok(Some(schedule(5, 2, on, ScheduleStatus::Available))));
        mocks.schedules.expect_create_batch().never();

        let result = mocks
            .into_service()
            .create(FieldScheduleRequest {
                field_id: field_uuid,
                date: "2025-03-01".to_string(),
                time_ids: vec![t1_uuid, t2_uuid],
            })
            .await;

        assert!(matches!(result, Err(ScheduleError::ScheduleAlreadyExists)));
    }

    #[tokio::test]
    async fn test_create_submits_one_batch() {
        let field = field();
        let field_uuid = field.uuid;
        let t1 = slot(1, 8);
        let t1_uuid = t1.uuid;

        let mut mocks = Mocks::new().with_field(field);
        mocks
            .time_slots
            .expect_find_by_uuid()
            .returning(move |_| Ok(Some(t1.clone())));
        mocks
            .schedules
            .expect_find_by_field_date_and_slot()
            .returning(|_, _, _| Ok(None));
        mocks
            .schedules
            .expect_create_batch()
            .withf(|batch| {
                batch.len() == 1
                    && batch[0].time_id == 1
                    && batch[0].date == NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
            })
            .times(1)
            .returning(|_| Ok(()));

        let count = mocks
            .into_service()
            .create(FieldScheduleRequest {
                field_id: field_uuid,
                date: "2025-03-01".to_string(),
                time_ids: vec![t1_uuid],
            })
            .await
            .unwrap();

        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input_before_touching_storage() {
        let service = Mocks::new().into_service();
        let time_id = Uuid::new_v4();

        let bad_date = service
            .create(FieldScheduleRequest {
                field_id: Uuid::new_v4(),
                date: "2025-13-01".to_string(),
                time_ids: vec![time_id],
            })
            .await;
        let empty = service
            .create(FieldScheduleRequest {
                field_id: Uuid::new_v4(),
                date: "2025-03-01".to_string(),
                time_ids: vec![],
            })
            .await;
        let duplicated = service
            .create(FieldScheduleRequest {
                field_id: Uuid::new_v4(),
                date: "2025-03-01".to_string(),
                time_ids: vec![time_id, time_id],
            })
            .await;

        assert!(matches!(bad_date, Err(ScheduleError::InvalidInput(_))));
        assert!(matches!(empty, Err(ScheduleError::InvalidInput(_))));
        assert!(matches!(duplicated, Err(ScheduleError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_create_unknown_time_slot() {
        let field = field();
        let field_uuid = field.uuid;

        let mut mocks = Mocks::new().with_field(field);
        mocks.time_slots.expect_find_by_uuid().returning(|_| Ok(None));
        mocks.schedules.expect_create_batch().never();

        let result = mocks
            .into_service()
            .create(FieldScheduleRequest {
                field_id: field_uuid,
                date: "2025-03-01".to_string(),
                time_ids: vec![Uuid::new_v4()],
            })
            .await;

        assert!(matches!(result, Err(ScheduleError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_status_partial_failure() {
        let on = date(2025, 3, 1);
        let s1 = schedule(1, 1, on, ScheduleStatus::Available);
        let s3 = schedule(3, 3, on, ScheduleStatus::Available);
        let (s1_uuid, s3_uuid) = (s1.uuid, s3.uuid);
        let s2_uuid = Uuid::new_v4();

        let mut mocks = Mocks::new();
        mocks
            .schedules
            .expect_find_by_uuid()
            .with(eq(s1_uuid))
            .times(1)
            .returning(move |_| Ok(Some(detailed(s1.clone()))));
        mocks
            .schedules
            .expect_find_by_uuid()
            .with(eq(s2_uuid))
            .times(1)
            .returning(|_| Ok(None));
        mocks
            .schedules
            .expect_find_by_uuid()
            .with(eq(s3_uuid))
            .never();
        mocks
            .schedules
            .expect_update_status()
            .with(eq(s1_uuid), eq(ScheduleStatus::Booked))
            .times(1)
            .returning(|_, _| Ok(()));

        let result = mocks
            .into_service()
            .update_status(UpdateStatusFieldScheduleRequest {
                field_schedule_ids: vec![s1_uuid, s2_uuid, s3_uuid],
            })
            .await;

        match result {
            Err(ScheduleError::NotFound(message)) => {
                assert!(message.contains(&s2_uuid.to_string()))
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_status_rebooking_is_not_an_error() {
        let booked = schedule(1, 1, date(2025, 3, 1), ScheduleStatus::Booked);
        let uuid = booked.uuid;

        let mut mocks = Mocks::new();
        mocks
            .schedules
            .expect_find_by_uuid()
            .returning(move |_| Ok(Some(detailed(booked.clone()))));
        mocks
            .schedules
            .expect_update_status()
            .with(eq(uuid), eq(ScheduleStatus::Booked))
            .times(1)
            .returning(|_, _| Ok(()));

        let result = mocks
            .into_service()
            .update_status(UpdateStatusFieldScheduleRequest {
                field_schedule_ids: vec![uuid],
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_collision_leaves_schedule_untouched() {
        let on = date(2025, 3, 1);
        let target = date(2025, 3, 2);
        let current = schedule(1, 1, on, ScheduleStatus::Available);
        let uuid = current.uuid;
        let new_slot = slot(2, 9);
        let new_slot_uuid = new_slot.uuid;

        let mut mocks = Mocks::new();
        mocks
            .schedules
            .expect_find_by_uuid()
            .returning(move |_| Ok(Some(detailed(current.clone()))));
        mocks
            .time_slots
            .expect_find_by_uuid()
            .returning(move |_| Ok(Some(new_slot.clone())));
        mocks
            .schedules
            .expect_find_by_field_date_and_slot()
            .with(eq(FIELD_ID), eq(target), eq(2))
            .times(1)
            .returning(move |_, _, _| Ok(Some(schedule(2, 2, target, ScheduleStatus::Available))));
        mocks.schedules.expect_update_fields().never();

        let result = mocks
            .into_service()
            .update(
                uuid,
                UpdateFieldScheduleRequest {
                    date: "2025-03-02".to_string(),
                    time_id: new_slot_uuid,
                },
            )
            .await;

        assert!(matches!(result, Err(ScheduleError::ScheduleAlreadyExists)));
    }

    #[tokio::test]
    async fn test_update_same_binding_is_allowed() {
        let on = date(2025, 3, 1);
        let current = schedule(1, 1, on, ScheduleStatus::Booked);
        let uuid = current.uuid;
        let found = current.clone();
        let same_slot = slot(1, 8);
        let same_slot_uuid = same_slot.uuid;

        let mut mocks = Mocks::new();
        let current_row = detailed(current.clone());
        mocks
            .schedules
            .expect_find_by_uuid()
            .returning(move |_| Ok(Some(current_row.clone())));
        mocks
            .time_slots
            .expect_find_by_uuid()
            .returning(move |_| Ok(Some(same_slot.clone())));
        mocks
            .schedules
            .expect_find_by_field_date_and_slot()
            .returning(move |_, _, _| Ok(Some(found.clone())));
        mocks
            .schedules
            .expect_update_fields()
            .with(eq(uuid), eq(SchedulePatch { date: on, time_id: 1 }))
            .times(1)
            .returning(move |_, _| Ok(detailed(current.clone())));

        let response = mocks
            .into_service()
            .update(
                uuid,
                UpdateFieldScheduleRequest {
                    date: "2025-03-01".to_string(),
                    time_id: same_slot_uuid,
                },
            )
            .await
            .unwrap();

        assert_eq!(response.uuid, uuid);
        assert_eq!(response.status, "Booked");
        assert_eq!(response.date, "2025-03-01");
    }

    #[tokio::test]
    async fn test_delete_missing_schedule() {
        let mut mocks = Mocks::new();
        mocks.schedules.expect_find_by_uuid().returning(|_| Ok(None));
        mocks.schedules.expect_delete().never();

        let result = mocks.into_service().delete(Uuid::new_v4()).await;

        assert!(matches!(result, Err(ScheduleError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_pagination_defaults_to_newest_first() {
        let on = date(2025, 3, 1);
        let mut mocks = Mocks::new();
        mocks
            .schedules
            .expect_find_all_paginated()
            .withf(|params| {
                params.page == 2
                    && params.limit == 10
                    && params.sort_column == SortColumn::CreatedAt
                    && params.sort_order == SortOrder::Desc
                    && params.offset() == 10
            })
            .times(1)
            .returning(move |_| {
                let rows = (0..10)
                    .map(|i| detailed(schedule(i, 1, on, ScheduleStatus::Available)))
                    .collect();
                Ok((rows, 25))
            });

        let page = mocks
            .into_service()
            .get_all_with_pagination(FieldScheduleRequestParam {
                page: 2,
                limit: 10,
                sort_column: None,
                sort_order: None,
            })
            .await
            .unwrap();

        assert_eq!(page.data.len(), 10);
        assert_eq!(page.count, 25);
        assert_eq!(page.total_page, 3);
        assert_eq!(page.next_page, Some(3));
        assert_eq!(page.previous_page, Some(1));
    }

    #[tokio::test]
    async fn test_pagination_rejects_unknown_sort_column() {
        let service = Mocks::new().into_service();

        let result = service
            .get_all_with_pagination(FieldScheduleRequestParam {
                page: 1,
                limit: 10,
                sort_column: Some("price; --".to_string()),
                sort_order: Some("asc".to_string()),
            })
            .await;

        assert!(matches!(result, Err(ScheduleError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_booking_view_labels() {
        let field = field();
        let field_uuid = field.uuid;
        let on = date(2025, 8, 17);

        let mut mocks = Mocks::new().with_field(field);
        mocks
            .schedules
            .expect_find_all_by_field_and_date()
            .with(eq(FIELD_ID), eq(on))
            .returning(move |_, _| Ok(vec![detailed(schedule(1, 1, on, ScheduleStatus::Booked))]));

        let rows = mocks
            .into_service()
            .get_all_by_field_id_and_date(field_uuid, "2025-08-17")
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "17 Agu");
        assert_eq!(rows[0].time, "08:00:00 - 09:00:00");
        assert_eq!(rows[0].status, "Booked");
        assert_eq!(rows[0].price_per_hour, "Rp. 120.000");
    }

    #[tokio::test]
    async fn test_get_by_uuid_not_found() {
        let mut mocks = Mocks::new();
        mocks.schedules.expect_find_by_uuid().returning(|_| Ok(None));

        let result = mocks.into_service().get_by_uuid(Uuid::new_v4()).await;

        assert!(matches!(result, Err(ScheduleError::NotFound(_))));
    }

    #[rstest::rstest]
    #[case(0, 10)]
    #[case(1, 0)]
    #[case(1, i64::MAX)]
    #[case(i64::MAX, 10)]
    #[tokio::test]
    async fn test_pagination_rejects_out_of_range_pages(#[case] page: i64, #[case] limit: i64) {
        let mut mocks = Mocks::new();
        mocks.schedules.expect_find_all_paginated().never();

        let result = mocks
            .into_service()
            .get_all_with_pagination(FieldScheduleRequestParam {
                page,
                limit,
                sort_column: None,
                sort_order: None,
            })
            .await;

        assert!(matches!(result, Err(ScheduleError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_booking_view_keeps_large_prices_exact() {
        let field = field();
        let field_uuid = field.uuid;
        let on = date(2025, 8, 17);

        let mut mocks = Mocks::new().with_field(field);
        mocks
            .schedules
            .expect_find_all_by_field_and_date()
            .returning(move |_, _| {
                let mut row = detailed(schedule(1, 1, on, ScheduleStatus::Available));
                row.price_per_hour = 9_007_199_254_740_993;
                Ok(vec![row])
            });

        let rows = mocks
            .into_service()
            .get_all_by_field_id_and_date(field_uuid, "2025-08-17")
            .await
            .unwrap();

        assert_eq!(rows[0].price_per_hour, "Rp. 9.007.199.254.740.993");
    }
}
