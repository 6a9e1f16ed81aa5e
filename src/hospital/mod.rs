//! Hospital appointment domain
//!
//! - `types`: console-entered values (statuses, genders, time slots, dates)
//! - `validation`: per-field checks applied at each prompt
//! - `queries`: every parameterized statement the client sends
//! - `operations`: inserts and reports
//! - `booking`: the two-phase appointment booking workflow
//!
//! The schema itself (`Hospital`, `Department`, `Doctor`, `Patient`,
//! `Appointment`, `has_appointment`, `searches`) is owned by the database and
//! is never created or altered from here.

mod booking;
mod errors;
mod operations;
mod queries;
mod types;
pub mod validation;

pub use booking::{
    commit_booking, plan_booking, BookingPlan, BookingReceipt, BookingRequest, Transition,
};
pub use errors::{BookingError, BookingResult, ValidationError};
pub use operations::{
    add_appointment, add_doctor, add_patient, appointment, department_availability,
    doctor_appointments, list_table, patient, patients_per_doctor, search_record,
    status_counts_per_doctor,
};
pub use queries::Table;
pub use types::{
    parse_date, AppointmentStatus, Gender, NewAppointment, NewDoctor, NewPatient, PatientDetails,
    TimeSlot,
};
