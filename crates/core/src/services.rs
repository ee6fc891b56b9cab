pub mod conflict;
pub mod field;
pub mod field_schedule;
pub mod time_slot;
