/// Field management endpoints
pub mod field;
/// Field schedule endpoints
pub mod field_schedule;
/// Time slot catalog endpoints
pub mod time_slot;
