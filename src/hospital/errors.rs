//! # Hospital Errors
//!
//! Field validation failures and booking workflow failures.

use thiserror::Error;

use crate::db::DbError;

/// Result type for booking operations
pub type BookingResult<T> = Result<T, BookingError>;

/// A console field was rejected before reaching the database
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{0}' is not a whole number")]
    NotAnInteger(String),

    #[error("{field} must be between 1 and {max} characters")]
    Length { field: &'static str, max: usize },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} must be greater than 0")]
    NotPositive { field: &'static str },

    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    #[error("please enter M or F for gender")]
    Gender,

    #[error("please enter appointment status using codes PA, AC, AV, or WL")]
    Status,

    #[error("time slot must look like HH:MM-HH:MM (24-hour) with the start before the end")]
    TimeSlot,

    #[error("'{0}' is not a valid date; use MM/DD/YYYY")]
    Date(String),

    #[error("end date {end} is before start date {start}")]
    DateRange { start: String, end: String },
}

/// Why an appointment could not be booked
#[derive(Debug, Error)]
pub enum BookingError {
    /// No `has_appointment` row links the doctor and the appointment
    #[error("appointment {appointment_id} is not assigned to doctor {doctor_id}")]
    NotAssigned { doctor_id: i32, appointment_id: i32 },

    /// The doctor's department does not resolve to a hospital
    #[error("no hospital found for doctor {0}")]
    NoHospital(i32),

    /// The appointment has already passed
    #[error("appointment {0} has already passed and is unavailable")]
    Unavailable(i32),

    /// The stored status is not one of PA, AC, AV, WL
    #[error("appointment has unrecognized status '{0}'")]
    UnknownStatus(String),

    /// Booking a new patient needs their details
    #[error("patient {0} is not in the database and no details were provided")]
    MissingPatientDetails(i32),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl BookingError {
    /// Whether the error ends the session rather than just this booking
    pub fn is_fatal(&self) -> bool {
        matches!(self, BookingError::Db(e) if e.is_fatal())
    }
}
