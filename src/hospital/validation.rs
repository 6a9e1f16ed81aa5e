//! Console field validators
//!
//! Each validator takes the raw line typed at a prompt and returns the typed
//! value or a `ValidationError` whose message is shown back to the operator.
//! Bounds mirror the column widths of the schema.

use chrono::NaiveDate;

use super::errors::ValidationError;
use super::types::{parse_date, AppointmentStatus, Gender, TimeSlot};

/// `Doctor.name`, `Patient.name`
pub const MAX_NAME_LEN: usize = 128;
/// `Doctor.specialty`
pub const MAX_SPECIALTY_LEN: usize = 24;
/// `Patient.address`
pub const MAX_ADDRESS_LEN: usize = 256;
/// `Department.name`
pub const MAX_DEPARTMENT_NAME_LEN: usize = 32;

/// Any integer identifier
pub fn id(input: &str) -> Result<i32, ValidationError> {
    let trimmed = input.trim();
    trimmed
        .parse::<i32>()
        .map_err(|_| ValidationError::NotAnInteger(trimmed.to_string()))
}

fn bounded_text(input: &str, field: &'static str, max: usize) -> Result<String, ValidationError> {
    let text = input.trim();
    let len = text.chars().count();
    if len == 0 || len > max {
        return Err(ValidationError::Length { field, max });
    }
    Ok(text.to_string())
}

pub fn doctor_name(input: &str) -> Result<String, ValidationError> {
    bounded_text(input, "Doctor's full name", MAX_NAME_LEN)
}

pub fn specialty(input: &str) -> Result<String, ValidationError> {
    bounded_text(input, "Doctor's specialty", MAX_SPECIALTY_LEN)
}

pub fn patient_name(input: &str) -> Result<String, ValidationError> {
    bounded_text(input, "Patient's full name", MAX_NAME_LEN)
}

pub fn department_name(input: &str) -> Result<String, ValidationError> {
    bounded_text(input, "Department name", MAX_DEPARTMENT_NAME_LEN)
}

pub fn gender(input: &str) -> Result<Gender, ValidationError> {
    input.parse()
}

pub fn age(input: &str) -> Result<i32, ValidationError> {
    let age = id(input)?;
    if age <= 0 {
        return Err(ValidationError::NotPositive {
            field: "Patient's age",
        });
    }
    Ok(age)
}

/// Address may be empty
pub fn address(input: &str) -> Result<String, ValidationError> {
    let text = input.trim();
    if text.chars().count() > MAX_ADDRESS_LEN {
        return Err(ValidationError::TooLong {
            field: "Patient's address",
            max: MAX_ADDRESS_LEN,
        });
    }
    Ok(text.to_string())
}

pub fn appointment_count(input: &str) -> Result<i32, ValidationError> {
    let count = id(input)?;
    if count < 0 {
        return Err(ValidationError::Negative {
            field: "Number of appointments",
        });
    }
    Ok(count)
}

pub fn status(input: &str) -> Result<AppointmentStatus, ValidationError> {
    input.parse()
}

pub fn time_slot(input: &str) -> Result<TimeSlot, ValidationError> {
    input.parse()
}

pub fn date(input: &str) -> Result<NaiveDate, ValidationError> {
    parse_date(input)
}

/// End of a search window; must not precede `start`
pub fn end_date(input: &str, start: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let end = parse_date(input)?;
    if end < start {
        return Err(ValidationError::DateRange {
            start: start.format("%m/%d/%Y").to_string(),
            end: end.format("%m/%d/%Y").to_string(),
        });
    }
    Ok(end)
}

/// `y`/`yes` in any case; everything else is no
pub fn yes(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
