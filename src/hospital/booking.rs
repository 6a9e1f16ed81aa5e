//! Booking a patient onto a doctor's appointment
//!
//! Booking runs in two phases so the console can ask for patient details in
//! between without holding a transaction open:
//!
//! 1. `plan_booking` reads: the appointment status (through
//!    `has_appointment`, so the appointment must belong to the doctor), the
//!    doctor's hospital, and whether the patient already exists.
//! 2. `commit_booking` writes, inside one `BEGIN`/`COMMIT`: the status
//!    transition, the patient insert or appointment-count increment, and the
//!    `searches` row. Any failure issues `ROLLBACK`.
//!
//! Status transitions:
//!
//! | current | next | effect                               |
//! |---------|------|--------------------------------------|
//! | AV      | AC   | patient takes the appointment        |
//! | AC      | WL   | patient is the first on the waitlist |
//! | WL      | WL   | patient joins the waitlist           |
//! | PA      | -    | rejected                             |

use crate::db::{begin, commit, rollback, SqlExecutor};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};

use super::errors::{BookingError, BookingResult};
use super::queries;
use super::types::{AppointmentStatus, PatientDetails};

/// Who wants which appointment of which doctor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRequest {
    pub patient_id: i32,
    pub doctor_id: i32,
    pub appointment_id: i32,
}

/// What happens to the appointment status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// AV -> AC
    Activate,
    /// AC -> WL
    Waitlist,
    /// WL stays WL
    JoinWaitlist,
}

impl Transition {
    pub fn for_status(status: AppointmentStatus, appointment_id: i32) -> BookingResult<Self> {
        match status {
            AppointmentStatus::Available => Ok(Transition::Activate),
            AppointmentStatus::Active => Ok(Transition::Waitlist),
            AppointmentStatus::Waitlisted => Ok(Transition::JoinWaitlist),
            AppointmentStatus::Past => Err(BookingError::Unavailable(appointment_id)),
        }
    }

    /// Status after the booking
    pub fn target(&self) -> AppointmentStatus {
        match self {
            Transition::Activate => AppointmentStatus::Active,
            Transition::Waitlist | Transition::JoinWaitlist => AppointmentStatus::Waitlisted,
        }
    }

    pub fn changes_status(&self) -> bool {
        !matches!(self, Transition::JoinWaitlist)
    }

    /// Operator-facing explanation
    pub fn describe(&self) -> &'static str {
        match self {
            Transition::Activate => {
                "Appointment is available. Changing appointment status to AC and adding patient to this appointment."
            }
            Transition::Waitlist => {
                "Appointment is already active. Changing appointment status to WL and adding patient to waitlist."
            }
            Transition::JoinWaitlist => {
                "Appointment currently has a waitlist. Adding patient to waitlist."
            }
        }
    }
}

/// Everything read before any write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingPlan {
    pub request: BookingRequest,
    pub current_status: AppointmentStatus,
    pub transition: Transition,
    pub hospital_id: i32,
    pub patient_known: bool,
}

impl BookingPlan {
    /// The console must collect `PatientDetails` before committing
    pub fn needs_patient_details(&self) -> bool {
        !self.patient_known
    }
}

/// What the committed booking did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingReceipt {
    pub request: BookingRequest,
    pub hospital_id: i32,
    pub status: AppointmentStatus,
    pub patient_created: bool,
}

/// Phase 1: read-only checks
pub fn plan_booking<E: SqlExecutor>(exec: &mut E, request: BookingRequest) -> BookingResult<BookingPlan> {
    let BookingRequest {
        patient_id,
        doctor_id,
        appointment_id,
    } = request;

    let status_rows = exec.query(&queries::appointment_status_for_doctor(doctor_id, appointment_id))?;
    if status_rows.is_empty() {
        return Err(BookingError::NotAssigned {
            doctor_id,
            appointment_id,
        });
    }
    let raw_status = status_rows.scalar().unwrap_or("NULL");
    let current_status: AppointmentStatus = raw_status
        .parse()
        .map_err(|_| BookingError::UnknownStatus(raw_status.to_string()))?;
    let transition = Transition::for_status(current_status, appointment_id)?;

    let hospital_rows = exec.query(&queries::hospital_of_doctor(doctor_id))?;
    let hospital_id = hospital_rows
        .scalar()
        .and_then(|v| v.trim().parse::<i32>().ok())
        .ok_or(BookingError::NoHospital(doctor_id))?;

    let patient_known = exec.exists(&queries::patient_by_id(patient_id))?;

    Ok(BookingPlan {
        request,
        current_status,
        transition,
        hospital_id,
        patient_known,
    })
}

/// Phase 2: all writes in one transaction
///
/// `details` is required when the plan says the patient is unknown and is
/// ignored otherwise.
pub fn commit_booking<E: SqlExecutor>(
    exec: &mut E,
    plan: &BookingPlan,
    details: Option<&PatientDetails>,
) -> BookingResult<BookingReceipt> {
    if plan.needs_patient_details() && details.is_none() {
        return Err(BookingError::MissingPatientDetails(plan.request.patient_id));
    }

    let appointment = plan.request.appointment_id.to_string();
    let patient = plan.request.patient_id.to_string();

    exec.execute(&begin())?;
    let applied = apply_writes(exec, plan, details).and_then(|receipt| {
        exec.execute(&commit())?;
        Ok(receipt)
    });

    match applied {
        Ok(receipt) => {
            log_event_with_fields(
                Event::BookingCommitted,
                &[
                    ("appointment", appointment.as_str()),
                    ("patient", patient.as_str()),
                    ("status", receipt.status.code()),
                ],
            );
            Ok(receipt)
        }
        Err(e) => {
            if let Err(rb) = exec.execute(&rollback()) {
                Logger::error("BOOKING_ROLLBACK_FAILED", &[("reason", rb.to_string().as_str())]);
            }
            let severity = if e.is_fatal() { Severity::Warn } else { Severity::Info };
            Logger::log(
                severity,
                Event::BookingRolledBack.as_str(),
                &[
                    ("appointment", appointment.as_str()),
                    ("patient", patient.as_str()),
                    ("reason", e.to_string().as_str()),
                ],
            );
            Err(e)
        }
    }
}

fn apply_writes<E: SqlExecutor>(
    exec: &mut E,
    plan: &BookingPlan,
    details: Option<&PatientDetails>,
) -> BookingResult<BookingReceipt> {
    let BookingRequest {
        patient_id,
        appointment_id,
        ..
    } = plan.request;

    if plan.transition.changes_status() {
        exec.execute(&queries::set_appointment_status(
            appointment_id,
            plan.transition.target(),
        ))?;
    }

    let patient_created = match (plan.patient_known, details) {
        (false, Some(details)) => {
            exec.execute(&queries::insert_booked_patient(patient_id, details))?;
            true
        }
        _ => {
            exec.execute(&queries::increment_patient_appointments(patient_id))?;
            false
        }
    };

    exec.execute(&queries::insert_search(plan.hospital_id, patient_id, appointment_id))?;

    Ok(BookingReceipt {
        request: plan.request,
        hospital_id: plan.hospital_id,
        status: plan.transition.target(),
        patient_created,
    })
}
