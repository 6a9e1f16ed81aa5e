//! In-memory stand-in for the hospital database
//!
//! Interprets the statements hospdb sends closely enough to check booking
//! effects, including BEGIN/COMMIT/ROLLBACK.

#![allow(dead_code)]

use std::collections::BTreeMap;

use hospdb::db::{DbError, DbResult, ResultSet, SqlExecutor, SqlParam, Statement};

#[derive(Debug, Clone, Default)]
pub struct Tables {
    /// appnt_ID -> status code
    pub appointments: BTreeMap<i32, String>,
    /// (doctor_id, appt_id)
    pub assignments: Vec<(i32, i32)>,
    /// doctor_ID -> hospital_ID
    pub hospitals: BTreeMap<i32, i32>,
    /// patient_ID -> number_of_appts
    pub patients: BTreeMap<i32, i32>,
    /// (hid, pid, aid)
    pub searches: Vec<(i32, i32, i32)>,
    pub doctors: Vec<i32>,
}

#[derive(Debug, Default)]
pub struct FakeHospital {
    pub tables: Tables,
    saved: Option<Tables>,
    /// Every statement received, whitespace-collapsed
    pub log: Vec<String>,
    /// Statements containing this text are rejected
    pub reject: Option<&'static str>,
    /// Statements containing this text lose the connection
    pub drop_connection: Option<&'static str>,
}

fn int(stmt: &Statement, i: usize) -> i32 {
    match &stmt.params()[i] {
        SqlParam::Int(v) => *v,
        other => panic!("param {} is not an int: {:?}", i, other),
    }
}

fn text(stmt: &Statement, i: usize) -> String {
    match &stmt.params()[i] {
        SqlParam::Text(v) => v.clone(),
        other => panic!("param {} is not text: {:?}", i, other),
    }
}

fn single(column: &str, value: String) -> ResultSet {
    ResultSet::new(vec![column.to_string()], vec![vec![Some(value)]])
}

impl FakeHospital {
    /// Doctor 1 in hospital 100 holds appointments 10 (AV), 11 (AC), 12 (WL)
    /// and 13 (PA). Patient 500 exists with 2 appointments.
    pub fn seeded() -> Self {
        let mut tables = Tables::default();
        for (id, status) in [(10, "AV"), (11, "AC"), (12, "WL"), (13, "PA")] {
            tables.appointments.insert(id, status.to_string());
            tables.assignments.push((1, id));
        }
        tables.appointments.insert(20, "AV".to_string());
        tables.hospitals.insert(1, 100);
        tables.patients.insert(500, 2);
        tables.doctors.push(1);

        Self {
            tables,
            ..Default::default()
        }
    }

    pub fn status(&self, appointment_id: i32) -> Option<&str> {
        self.tables.appointments.get(&appointment_id).map(String::as_str)
    }

    pub fn in_transaction(&self) -> bool {
        self.saved.is_some()
    }

    pub fn sent(&self, prefix: &str) -> usize {
        self.log.iter().filter(|sql| sql.starts_with(prefix)).count()
    }

    fn check(&mut self, stmt: &Statement) -> DbResult<String> {
        let sql = stmt.sql().split_whitespace().collect::<Vec<_>>().join(" ");
        self.log.push(sql.clone());
        if let Some(needle) = self.drop_connection {
            if sql.contains(needle) {
                return Err(DbError::Closed);
            }
        }
        if let Some(needle) = self.reject {
            if sql.contains(needle) {
                return Err(DbError::Statement(format!(
                    "simulated rejection of '{}'",
                    needle
                )));
            }
        }
        Ok(sql)
    }
}

impl SqlExecutor for FakeHospital {
    fn execute(&mut self, stmt: &Statement) -> DbResult<u64> {
        let sql = self.check(stmt)?;

        match sql.as_str() {
            "BEGIN" => {
                self.saved = Some(self.tables.clone());
                return Ok(0);
            }
            "COMMIT" => {
                self.saved = None;
                return Ok(0);
            }
            "ROLLBACK" => {
                if let Some(saved) = self.saved.take() {
                    self.tables = saved;
                }
                return Ok(0);
            }
            _ => {}
        }

        let t = &mut self.tables;
        if sql.starts_with("UPDATE Appointment SET status") {
            t.appointments.insert(int(stmt, 1), text(stmt, 0));
        } else if sql.starts_with("UPDATE Patient SET number_of_appts") {
            if let Some(count) = t.patients.get_mut(&int(stmt, 0)) {
                *count += 1;
            }
        } else if sql.starts_with("INSERT INTO Patient") {
            let id = int(stmt, 0);
            if t.patients.contains_key(&id) {
                return Err(DbError::Statement("duplicate key value violates unique constraint \"patient_pkey\"".into()));
            }
            t.patients.insert(id, int(stmt, 5));
        } else if sql.starts_with("INSERT INTO searches") {
            t.searches.push((int(stmt, 0), int(stmt, 1), int(stmt, 2)));
        } else if sql.starts_with("INSERT INTO Doctor") {
            let id = int(stmt, 0);
            if t.doctors.contains(&id) {
                return Err(DbError::Statement("duplicate key value violates unique constraint \"doctor_pkey\"".into()));
            }
            t.doctors.push(id);
        } else if sql.starts_with("INSERT INTO Appointment") {
            t.appointments.insert(int(stmt, 0), text(stmt, 3));
        }
        Ok(1)
    }

    fn query(&mut self, stmt: &Statement) -> DbResult<ResultSet> {
        let sql = self.check(stmt)?;
        let t = &self.tables;

        if sql.contains("A.status::text") {
            let (doctor, appt) = (int(stmt, 0), int(stmt, 1));
            if !t.assignments.contains(&(doctor, appt)) {
                return Ok(ResultSet::empty());
            }
            return Ok(match t.appointments.get(&appt) {
                Some(status) => single("status", status.clone()),
                None => ResultSet::empty(),
            });
        }
        if sql.starts_with("SELECT H.hospital_ID") {
            return Ok(match t.hospitals.get(&int(stmt, 0)) {
                Some(hid) => single("hospital_id", hid.to_string()),
                None => ResultSet::empty(),
            });
        }
        if sql.starts_with("SELECT * FROM Patient WHERE") {
            let id = int(stmt, 0);
            return Ok(match t.patients.get(&id) {
                Some(count) => ResultSet::new(
                    vec!["patient_id".into(), "number_of_appts".into()],
                    vec![vec![Some(id.to_string()), Some(count.to_string())]],
                ),
                None => ResultSet::empty(),
            });
        }
        if sql.starts_with("SELECT * FROM Appointment WHERE") {
            let id = int(stmt, 0);
            return Ok(match t.appointments.get(&id) {
                Some(status) => ResultSet::new(
                    vec!["appnt_id".into(), "status".into()],
                    vec![vec![Some(id.to_string()), Some(status.clone())]],
                ),
                None => ResultSet::empty(),
            });
        }
        if sql.starts_with("SELECT hid, pid, aid FROM searches") {
            let key = (int(stmt, 0), int(stmt, 1), int(stmt, 2));
            let rows = t
                .searches
                .iter()
                .filter(|row| **row == key)
                .map(|(h, p, a)| vec![Some(h.to_string()), Some(p.to_string()), Some(a.to_string())])
                .collect();
            return Ok(ResultSet::new(
                vec!["hid".into(), "pid".into(), "aid".into()],
                rows,
            ));
        }
        Ok(ResultSet::empty())
    }
}
