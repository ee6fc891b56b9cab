//! Translation of storage failures into domain errors.

use fieldsched_core::errors::ScheduleError;

/// Unique constraint guarding `(field_id, date, time_id)` on `field_schedules`.
pub const SCHEDULE_SLOT_CONSTRAINT: &str = "uq_field_schedules_field_date_time";

/// Unique constraint on `fields.code`.
pub const FIELD_CODE_CONSTRAINT: &str = "uq_fields_code";

/// Foreign key from `field_schedules.field_id` to `fields.id`.
pub const SCHEDULE_FIELD_FOREIGN_KEY: &str = "fk_field_schedules_field";

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Domain error for a violation of one of the named constraints, if any.
pub(crate) fn classify_constraint(
    code: Option<&str>,
    constraint: Option<&str>,
) -> Option<ScheduleError> {
    match (code?, constraint?) {
        (UNIQUE_VIOLATION, SCHEDULE_SLOT_CONSTRAINT) => Some(ScheduleError::ScheduleAlreadyExists),
        (UNIQUE_VIOLATION, FIELD_CODE_CONSTRAINT) => Some(ScheduleError::FieldCodeAlreadyExists),
        (FOREIGN_KEY_VIOLATION, SCHEDULE_FIELD_FOREIGN_KEY) => Some(ScheduleError::InvalidInput(
            "Field is referenced by existing field schedules".to_string(),
        )),
        _ => None,
    }
}

/// Maps a repository failure to the domain taxonomy.
///
/// A write rejected by the schedule slot constraint is a conflict, exactly as
/// if the application-level check had found the occupying row. A taken field
/// code and a field still referenced by schedules get their own kinds.
/// Everything else is a persistence failure.
pub fn into_schedule_error(report: eyre::Report) -> ScheduleError {
    if let Some(sqlx::Error::Database(db_err)) = report.downcast_ref::<sqlx::Error>() {
        let constraint = db_err.constraint();
        if let Some(error) = classify_constraint(db_err.code().as_deref(), constraint) {
            tracing::warn!(constraint = ?constraint, "Write rejected by constraint: {}", error);
            return error;
        }
    }

    ScheduleError::Persistence(report)
}
