//! Statement catalogue
//!
//! Every SQL string the client sends lives here. User values are bound as
//! parameters; nothing typed at the console is spliced into SQL text.

use chrono::NaiveDate;

use crate::db::Statement;

use super::types::{AppointmentStatus, NewAppointment, NewDoctor, NewPatient, PatientDetails};

/// Tables that can be listed before and after an insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Doctor,
    Patient,
    Appointment,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Doctor => "Doctor",
            Table::Patient => "Patient",
            Table::Appointment => "Appointment",
        }
    }
}

/// Full listing of one table, ordered by its key
pub fn select_all(table: Table) -> Statement {
    Statement::new(match table {
        Table::Doctor => "SELECT * FROM Doctor ORDER BY doctor_ID",
        Table::Patient => "SELECT * FROM Patient ORDER BY patient_ID",
        Table::Appointment => "SELECT * FROM Appointment ORDER BY appnt_ID",
    })
}

pub fn insert_doctor(doctor: &NewDoctor) -> Statement {
    Statement::new(
        "INSERT INTO Doctor (doctor_ID, name, specialty, did) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(doctor.doctor_id)
    .bind(doctor.name.as_str())
    .bind(doctor.specialty.as_str())
    .bind(doctor.department_id)
}

fn insert_patient_row(patient_id: i32, details: &PatientDetails, appointments: i32) -> Statement {
    Statement::new(
        "INSERT INTO Patient (patient_ID, name, gtype, age, address, number_of_appts) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(patient_id)
    .bind(details.name.as_str())
    .bind(details.gender.code())
    .bind(details.age)
    .bind(details.address.as_str())
    .bind(appointments)
}

pub fn insert_patient(patient: &NewPatient) -> Statement {
    insert_patient_row(patient.patient_id, &patient.details, patient.appointment_count)
}

/// A patient created while booking starts with that one appointment
pub fn insert_booked_patient(patient_id: i32, details: &PatientDetails) -> Statement {
    insert_patient_row(patient_id, details, 1)
}

pub fn insert_appointment(appointment: &NewAppointment) -> Statement {
    Statement::new(
        "INSERT INTO Appointment (appnt_ID, adate, time_slot, status) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(appointment.appointment_id)
    .bind(appointment.date)
    .bind(appointment.time_slot.to_string())
    .bind(appointment.status.code())
}

/// Status of an appointment, only if it belongs to the doctor
pub fn appointment_status_for_doctor(doctor_id: i32, appointment_id: i32) -> Statement {
    Statement::new(
        "SELECT A.status::text AS status \
         FROM Appointment A \
         JOIN has_appointment H ON H.appt_id = A.appnt_ID \
         WHERE H.doctor_id = $1 AND A.appnt_ID = $2",
    )
    .bind(doctor_id)
    .bind(appointment_id)
}

/// Hospital that employs the doctor, through the doctor's department
pub fn hospital_of_doctor(doctor_id: i32) -> Statement {
    Statement::new(
        "SELECT H.hospital_ID \
         FROM Doctor D \
         JOIN Department DT ON DT.dept_ID = D.did \
         JOIN Hospital H ON H.hospital_ID = DT.hid \
         WHERE D.doctor_ID = $1",
    )
    .bind(doctor_id)
}

pub fn appointment_by_id(appointment_id: i32) -> Statement {
    Statement::new("SELECT * FROM Appointment WHERE appnt_ID = $1").bind(appointment_id)
}

pub fn patient_by_id(patient_id: i32) -> Statement {
    Statement::new("SELECT * FROM Patient WHERE patient_ID = $1").bind(patient_id)
}

pub fn set_appointment_status(appointment_id: i32, status: AppointmentStatus) -> Statement {
    Statement::new("UPDATE Appointment SET status = $1 WHERE appnt_ID = $2")
        .bind(status.code())
        .bind(appointment_id)
}

pub fn increment_patient_appointments(patient_id: i32) -> Statement {
    Statement::new(
        "UPDATE Patient SET number_of_appts = COALESCE(number_of_appts, 0) + 1 \
         WHERE patient_ID = $1",
    )
    .bind(patient_id)
}

pub fn insert_search(hospital_id: i32, patient_id: i32, appointment_id: i32) -> Statement {
    Statement::new("INSERT INTO searches (hid, pid, aid) VALUES ($1, $2, $3)")
        .bind(hospital_id)
        .bind(patient_id)
        .bind(appointment_id)
}

pub fn search_row(hospital_id: i32, patient_id: i32, appointment_id: i32) -> Statement {
    Statement::new(
        "SELECT hid, pid, aid FROM searches \
         WHERE hid = $1 AND pid = $2 AND aid = $3",
    )
    .bind(hospital_id)
    .bind(patient_id)
    .bind(appointment_id)
}

/// Active and available appointments of a doctor within `[start, end]`
pub fn doctor_appointments_between(doctor_id: i32, start: NaiveDate, end: NaiveDate) -> Statement {
    Statement::new(
        "SELECT DISTINCT A.appnt_ID, A.adate, A.time_slot, A.status \
         FROM Appointment A \
         JOIN has_appointment H ON H.appt_id = A.appnt_ID \
         WHERE H.doctor_id = $1 \
           AND A.status IN ('AC', 'AV') \
           AND A.adate BETWEEN $2 AND $3 \
         ORDER BY A.adate, A.appnt_ID",
    )
    .bind(doctor_id)
    .bind(start)
    .bind(end)
}

/// Available appointments on `date` held by doctors of the named department
pub fn department_available_on(department: &str, date: NaiveDate) -> Statement {
    Statement::new(
        "SELECT DISTINCT A.appnt_ID, A.adate, A.time_slot, D.doctor_ID, D.name AS doctor \
         FROM Department DT \
         JOIN Doctor D ON D.did = DT.dept_ID \
         JOIN has_appointment H ON H.doctor_id = D.doctor_ID \
         JOIN Appointment A ON A.appnt_ID = H.appt_id \
         WHERE DT.name = $1 \
           AND A.status = 'AV' \
           AND A.adate = $2 \
         ORDER BY A.appnt_ID",
    )
    .bind(department)
    .bind(date)
}

/// Appointments per doctor and status, largest groups first
pub fn status_counts_per_doctor() -> Statement {
    Statement::new(
        "SELECT D.doctor_ID, D.name, D.specialty, A.status, count(*) AS num_appnts \
         FROM Doctor D \
         JOIN has_appointment H ON H.doctor_id = D.doctor_ID \
         JOIN Appointment A ON A.appnt_ID = H.appt_id \
         GROUP BY D.doctor_ID, D.name, D.specialty, A.status \
         ORDER BY num_appnts DESC, D.doctor_ID, A.status",
    )
}

/// Bookings per doctor whose appointment has `status`
///
/// Every `searches` row counts, so a patient booked twice counts twice.
pub fn patients_per_doctor_with_status(status: AppointmentStatus) -> Statement {
    Statement::new(
        "SELECT D.doctor_ID, D.name, D.specialty, count(S.pid) AS num_patients \
         FROM Doctor D \
         JOIN has_appointment H ON H.doctor_id = D.doctor_ID \
         JOIN Appointment A ON A.appnt_ID = H.appt_id \
         JOIN searches S ON S.aid = A.appnt_ID \
         WHERE A.status = $1 \
         GROUP BY D.doctor_ID, D.name, D.specialty \
         ORDER BY num_patients DESC, D.doctor_ID",
    )
    .bind(status.code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqlParam;
    use crate::hospital::types::{Gender, TimeSlot};

    fn placeholders(sql: &str) -> usize {
        (1..=9).filter(|n| sql.contains(&format!("${}", n))).count()
    }

    fn details() -> PatientDetails {
        PatientDetails {
            name: "Robert'); DROP TABLE Patient;--".to_string(),
            gender: Gender::Male,
            age: 40,
            address: "1 Main St".to_string(),
        }
    }

    #[test]
    fn test_placeholder_count_matches_params() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let statements = vec![
            insert_doctor(&NewDoctor {
                doctor_id: 1,
                name: "Ada".into(),
                specialty: "Surgery".into(),
                department_id: 2,
            }),
            insert_patient(&NewPatient {
                patient_id: 5,
                details: details(),
                appointment_count: 0,
            }),
            insert_booked_patient(5, &details()),
            insert_appointment(&NewAppointment {
                appointment_id: 9,
                date,
                time_slot: "08:00-09:00".parse::<TimeSlot>().unwrap(),
                status: AppointmentStatus::Available,
            }),
            appointment_status_for_doctor(1, 9),
            hospital_of_doctor(1),
            appointment_by_id(9),
            patient_by_id(5),
            set_appointment_status(9, AppointmentStatus::Active),
            increment_patient_appointments(5),
            insert_search(3, 5, 9),
            search_row(3, 5, 9),
            doctor_appointments_between(1, date, date),
            department_available_on("Oncology", date),
            status_counts_per_doctor(),
            patients_per_doctor_with_status(AppointmentStatus::Waitlisted),
            select_all(Table::Doctor),
        ];

        for stmt in statements {
            assert_eq!(placeholders(stmt.sql()), stmt.params().len(), "{}", stmt.sql());
        }
    }

    #[test]
    fn test_user_text_never_reaches_sql() {
        let stmt = insert_patient(&NewPatient {
            patient_id: 5,
            details: details(),
            appointment_count: 0,
        });

        assert!(!stmt.sql().contains("DROP"));
        assert_eq!(
            stmt.params()[1],
            SqlParam::Text("Robert'); DROP TABLE Patient;--".into())
        );
    }

    #[test]
    fn test_booked_patient_starts_with_one_appointment() {
        let stmt = insert_booked_patient(5, &details());
        assert_eq!(stmt.params().last(), Some(&SqlParam::Int(1)));
        assert_eq!(stmt.params()[2], SqlParam::Text("M".into()));
    }

    #[test]
    fn test_appointment_binds_typed_date_and_slot_text() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let stmt = insert_appointment(&NewAppointment {
            appointment_id: 9,
            date,
            time_slot: "8:00-9:15".parse::<TimeSlot>().unwrap(),
            status: AppointmentStatus::Past,
        });

        assert_eq!(
            stmt.params(),
            &[
                SqlParam::Int(9),
                SqlParam::Date(date),
                SqlParam::Text("08:00-09:15".into()),
                SqlParam::Text("PA".into()),
            ]
        );
    }

    #[test]
    fn test_status_update_binds_code_first() {
        let stmt = set_appointment_status(12, AppointmentStatus::Waitlisted);
        assert_eq!(
            stmt.params(),
            &[SqlParam::Text("WL".into()), SqlParam::Int(12)]
        );
    }

    #[test]
    fn test_patients_per_doctor_counts_every_booking() {
        let stmt = patients_per_doctor_with_status(AppointmentStatus::Active);
        assert!(stmt.sql().contains("count(S.pid) AS num_patients"));
        assert!(!stmt.sql().contains("DISTINCT"));
        assert_eq!(stmt.params(), &[SqlParam::Text("AC".into())]);
    }

    #[test]
    fn test_table_names() {
        assert_eq!(Table::Doctor.name(), "Doctor");
        assert!(select_all(Table::Appointment).sql().contains("FROM Appointment"));
    }
}
