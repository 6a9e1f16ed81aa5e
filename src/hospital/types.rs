//! Domain values entered at the console
//!
//! These are transient: they exist between a prompt and the statement that
//! carries them to the database.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use super::errors::ValidationError;

/// Appointment status codes as stored in `Appointment.status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppointmentStatus {
    /// `PA`: the appointment date has passed
    Past,
    /// `AC`: booked by a patient
    Active,
    /// `AV`: open for booking
    Available,
    /// `WL`: booked, with further patients waitlisted
    Waitlisted,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Past,
        AppointmentStatus::Active,
        AppointmentStatus::Available,
        AppointmentStatus::Waitlisted,
    ];

    /// The two-letter code
    pub fn code(&self) -> &'static str {
        match self {
            AppointmentStatus::Past => "PA",
            AppointmentStatus::Active => "AC",
            AppointmentStatus::Available => "AV",
            AppointmentStatus::Waitlisted => "WL",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or(ValidationError::Status)
    }
}

/// `Patient.gtype`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" | "m" => Ok(Gender::Male),
            "F" | "f" => Ok(Gender::Female),
            _ => Err(ValidationError::Gender),
        }
    }
}

/// `Appointment.time_slot`, stored as `HH:MM-HH:MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    start: NaiveTime,
    end: NaiveTime,
}

fn time_slot_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{1,2}):(\d{2})\s*-\s*(\d{1,2}):(\d{2})$").expect("time slot pattern")
    })
}

impl TimeSlot {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::TimeSlot);
        }
        Ok(Self { start, end })
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

impl FromStr for TimeSlot {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = time_slot_pattern()
            .captures(s.trim())
            .ok_or(ValidationError::TimeSlot)?;

        let field = |i: usize| -> Result<u32, ValidationError> {
            caps[i].parse::<u32>().map_err(|_| ValidationError::TimeSlot)
        };

        let start = NaiveTime::from_hms_opt(field(1)?, field(2)?, 0).ok_or(ValidationError::TimeSlot)?;
        let end = NaiveTime::from_hms_opt(field(3)?, field(4)?, 0).ok_or(ValidationError::TimeSlot)?;
        TimeSlot::new(start, end)
    }
}

/// Parse `MM/DD/YYYY`, `MM/DD/YY` or `YYYY-MM-DD`
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let s = input.trim();
    let invalid = || ValidationError::Date(s.to_string());

    if s.contains('-') {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid());
    }

    let year = s.rsplit('/').next().ok_or_else(invalid)?;
    let format = match year.len() {
        2 => "%m/%d/%y",
        4 => "%m/%d/%Y",
        _ => return Err(invalid()),
    };
    NaiveDate::parse_from_str(s, format).map_err(|_| invalid())
}

/// Menu 1 input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDoctor {
    pub doctor_id: i32,
    pub name: String,
    pub specialty: String,
    pub department_id: i32,
}

/// Personal details of a patient; also collected when booking for an unknown patient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientDetails {
    pub name: String,
    pub gender: Gender,
    pub age: i32,
    pub address: String,
}

/// Menu 2 input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub patient_id: i32,
    pub details: PatientDetails,
    pub appointment_count: i32,
}

/// Menu 3 input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub appointment_id: i32,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub status: AppointmentStatus,
}
