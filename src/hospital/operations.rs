//! Insert and report operations
//!
//! Each function is one round trip through the executor. Console prompting
//! lives in the CLI; these only see validated values.

use chrono::NaiveDate;

use crate::db::{DbResult, ResultSet, SqlExecutor};

use super::queries::{self, Table};
use super::types::{AppointmentStatus, NewAppointment, NewDoctor, NewPatient};

/// Current contents of a table
pub fn list_table<E: SqlExecutor>(exec: &mut E, table: Table) -> DbResult<ResultSet> {
    exec.query(&queries::select_all(table))
}

/// One appointment row
pub fn appointment<E: SqlExecutor>(exec: &mut E, appointment_id: i32) -> DbResult<ResultSet> {
    exec.query(&queries::appointment_by_id(appointment_id))
}

/// One patient row
pub fn patient<E: SqlExecutor>(exec: &mut E, patient_id: i32) -> DbResult<ResultSet> {
    exec.query(&queries::patient_by_id(patient_id))
}

/// The `searches` row a booking recorded
pub fn search_record<E: SqlExecutor>(
    exec: &mut E,
    hospital_id: i32,
    patient_id: i32,
    appointment_id: i32,
) -> DbResult<ResultSet> {
    exec.query(&queries::search_row(hospital_id, patient_id, appointment_id))
}

/// Menu 1
pub fn add_doctor<E: SqlExecutor>(exec: &mut E, doctor: &NewDoctor) -> DbResult<()> {
    exec.execute(&queries::insert_doctor(doctor))?;
    Ok(())
}

/// Menu 2
pub fn add_patient<E: SqlExecutor>(exec: &mut E, patient: &NewPatient) -> DbResult<()> {
    exec.execute(&queries::insert_patient(patient))?;
    Ok(())
}

/// Menu 3
pub fn add_appointment<E: SqlExecutor>(exec: &mut E, appointment: &NewAppointment) -> DbResult<()> {
    exec.execute(&queries::insert_appointment(appointment))?;
    Ok(())
}

/// Menu 5: active and available appointments of a doctor in a date window
pub fn doctor_appointments<E: SqlExecutor>(
    exec: &mut E,
    doctor_id: i32,
    start: NaiveDate,
    end: NaiveDate,
) -> DbResult<ResultSet> {
    exec.query(&queries::doctor_appointments_between(doctor_id, start, end))
}

/// Menu 6: available appointments of a department on one day
pub fn department_availability<E: SqlExecutor>(
    exec: &mut E,
    department: &str,
    date: NaiveDate,
) -> DbResult<ResultSet> {
    exec.query(&queries::department_available_on(department, date))
}

/// Menu 7: appointment count per doctor and status, descending
pub fn status_counts_per_doctor<E: SqlExecutor>(exec: &mut E) -> DbResult<ResultSet> {
    exec.query(&queries::status_counts_per_doctor())
}

/// Menu 8: patients per doctor with appointments in `status`
pub fn patients_per_doctor<E: SqlExecutor>(
    exec: &mut E,
    status: AppointmentStatus,
) -> DbResult<ResultSet> {
    exec.query(&queries::patients_per_doctor_with_status(status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DbError, SqlParam, Statement};

    #[derive(Default)]
    struct Recorder {
        seen: Vec<Statement>,
        reject: bool,
    }

    impl SqlExecutor for Recorder {
        fn execute(&mut self, stmt: &Statement) -> DbResult<u64> {
            self.seen.push(stmt.clone());
            if self.reject {
                return Err(DbError::Statement("duplicate key value".into()));
            }
            Ok(1)
        }

        fn query(&mut self, stmt: &Statement) -> DbResult<ResultSet> {
            self.seen.push(stmt.clone());
            Ok(ResultSet::empty())
        }
    }

    #[test]
    fn test_add_doctor_sends_one_insert() {
        let mut exec = Recorder::default();
        let doctor = NewDoctor {
            doctor_id: 11,
            name: "Grace Hopper".into(),
            specialty: "Neurology".into(),
            department_id: 3,
        };

        add_doctor(&mut exec, &doctor).unwrap();

        assert_eq!(exec.seen.len(), 1);
        assert!(exec.seen[0].sql().starts_with("INSERT INTO Doctor"));
        assert_eq!(exec.seen[0].params()[0], SqlParam::Int(11));
    }

    #[test]
    fn test_insert_failure_propagates() {
        let mut exec = Recorder {
            reject: true,
            ..Default::default()
        };
        let doctor = NewDoctor {
            doctor_id: 11,
            name: "Grace Hopper".into(),
            specialty: "Neurology".into(),
            department_id: 3,
        };

        let err = add_doctor(&mut exec, &doctor).unwrap_err();
        assert_eq!(err.to_string(), "duplicate key value");
    }

    #[test]
    fn test_reports_bind_their_inputs() {
        let mut exec = Recorder::default();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();

        doctor_appointments(&mut exec, 4, start, end).unwrap();
        department_availability(&mut exec, "Cardiology", start).unwrap();
        status_counts_per_doctor(&mut exec).unwrap();
        patients_per_doctor(&mut exec, AppointmentStatus::Active).unwrap();

        assert_eq!(
            exec.seen[0].params(),
            &[SqlParam::Int(4), SqlParam::Date(start), SqlParam::Date(end)]
        );
        assert_eq!(
            exec.seen[1].params(),
            &[SqlParam::Text("Cardiology".into()), SqlParam::Date(start)]
        );
        assert!(exec.seen[2].params().is_empty());
        assert_eq!(exec.seen[3].params(), &[SqlParam::Text("AC".into())]);
    }
}
