pub mod field;
pub mod schedule;
pub mod time_slot;
