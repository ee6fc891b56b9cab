use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Field schedule already exists")]
    ScheduleAlreadyExists,

    #[error("Field code already exists")]
    FieldCodeAlreadyExists,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Persistence failure: {0}")]
    Persistence(#[from] eyre::Report),
}

impl ScheduleError {
    /// Stable, enumerable identifier for the error kind.
    ///
    /// Callers that translate errors into transport responses should branch on
    /// this (or on the variant) rather than on the display message.
    pub fn code(&self) -> &'static str {
        match self {
            ScheduleError::NotFound(_) => "NOT_FOUND",
            ScheduleError::ScheduleAlreadyExists => "SCHEDULE_ALREADY_EXISTS",
            ScheduleError::FieldCodeAlreadyExists => "FIELD_CODE_ALREADY_EXISTS",
            ScheduleError::InvalidInput(_) => "INVALID_INPUT",
            ScheduleError::Persistence(_) => "PERSISTENCE_FAILURE",
        }
    }

    pub fn field_not_found(id: impl std::fmt::Display) -> Self {
        ScheduleError::NotFound(format!("Field with ID {} not found", id))
    }

    pub fn time_slot_not_found(id: impl std::fmt::Display) -> Self {
        ScheduleError::NotFound(format!("Time slot with ID {} not found", id))
    }

    pub fn schedule_not_found(id: impl std::fmt::Display) -> Self {
        ScheduleError::NotFound(format!("Field schedule with ID {} not found", id))
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
