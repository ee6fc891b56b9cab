pub mod field;
pub mod pagination;
pub mod schedule;
pub mod time_slot;
