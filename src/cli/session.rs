//! Interactive session: the menu loop and one handler per menu entry
//!
//! Handlers prompt until each field validates, then run the operation.
//! A statement the database rejects prints `Query failed! <reason>` and
//! returns to the menu; losing the connection or the console ends the session.

use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::db::{DbError, SqlExecutor};
use crate::hospital::{
    self, commit_booking, plan_booking, validation, BookingError, BookingRequest, NewAppointment,
    NewDoctor, NewPatient, PatientDetails, Table,
};
use crate::observability::{log_event_with_fields, Event, ObservationScope, SessionMetrics};

use super::errors::{CliError, CliResult};
use super::io::Console;
use super::menu::{render_menu, MenuChoice};

/// Why a menu operation stopped early
enum OpError {
    Cli(CliError),
    Db(DbError),
    Rejected(BookingError),
}

impl From<CliError> for OpError {
    fn from(e: CliError) -> Self {
        OpError::Cli(e)
    }
}

impl From<DbError> for OpError {
    fn from(e: DbError) -> Self {
        OpError::Db(e)
    }
}

impl From<BookingError> for OpError {
    fn from(e: BookingError) -> Self {
        match e {
            BookingError::Db(db) => OpError::Db(db),
            other => OpError::Rejected(other),
        }
    }
}

type OpResult = Result<(), OpError>;

/// One connected console session
pub struct Session<E, R, W> {
    exec: E,
    console: Console<R, W>,
    metrics: Arc<SessionMetrics>,
    session_id: String,
}

impl<E: SqlExecutor, R: BufRead, W: Write> Session<E, R, W> {
    pub fn new(
        exec: E,
        console: Console<R, W>,
        metrics: Arc<SessionMetrics>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            exec,
            console,
            metrics,
            session_id: session_id.into(),
        }
    }

    pub fn into_parts(self) -> (E, Console<R, W>) {
        (self.exec, self.console)
    }

    /// Show the menu and run choices until `9` or end of input
    pub fn run_menu(&mut self) -> CliResult<()> {
        match self.menu_loop() {
            Err(e) if e.is_input_closed() => {
                log_event_with_fields(Event::InputClosed, &[("session", self.session_id.as_str())]);
                Ok(())
            }
            other => other,
        }
    }

    fn menu_loop(&mut self) -> CliResult<()> {
        loop {
            self.console.say(&render_menu())?;
            let number = self.read_choice()?;
            match MenuChoice::from_number(number) {
                Some(MenuChoice::Exit) => return Ok(()),
                Some(choice) => self.dispatch(choice)?,
                None => self.console.line("Unrecognized choice!")?,
            }
        }
    }

    fn read_choice(&mut self) -> CliResult<i64> {
        loop {
            let answer = self.console.prompt("Please make your choice: ")?;
            match answer.trim().parse::<i64>() {
                Ok(n) => return Ok(n),
                Err(_) => self.console.line("Your input is invalid!")?,
            }
        }
    }

    /// Run one menu operation inside an observation scope
    pub fn dispatch(&mut self, choice: MenuChoice) -> CliResult<()> {
        if choice == MenuChoice::Exit {
            return Ok(());
        }

        let scope =
            ObservationScope::with_fields(choice.scope_name(), &[("session", self.session_id.as_str())]);
        self.metrics.increment_operations();

        let result = match choice {
            MenuChoice::AddDoctor => self.add_doctor(),
            MenuChoice::AddPatient => self.add_patient(),
            MenuChoice::AddAppointment => self.add_appointment(),
            MenuChoice::MakeAppointment => self.make_appointment(),
            MenuChoice::DoctorAppointments => self.doctor_appointments(),
            MenuChoice::DepartmentAvailability => self.department_availability(),
            MenuChoice::StatusCounts => self.status_counts(),
            MenuChoice::PatientsPerDoctor => self.patients_per_doctor(),
            MenuChoice::Exit => Ok(()),
        };

        match result {
            Ok(()) => {
                scope.complete();
                Ok(())
            }
            Err(OpError::Cli(e)) if e.is_input_closed() => {
                scope.reject(e.message());
                Err(e)
            }
            Err(OpError::Cli(e)) => {
                scope.fail(&e.to_string());
                Err(e)
            }
            Err(OpError::Db(e)) if e.is_fatal() => {
                scope.fail(&e.to_string());
                Err(e.into())
            }
            Err(OpError::Db(e)) => {
                let reason = e.to_string();
                scope.reject(&reason);
                self.console.line(&format!("Query failed! {}", reason))
            }
            Err(OpError::Rejected(e)) => {
                let reason = e.to_string();
                scope.reject(&reason);
                self.console.line(&format!("Invalid input! {}", reason))
            }
        }
    }

    fn offer_listing(&mut self, question: &str, table: Table) -> OpResult {
        if self.console.confirm(question)? {
            let rows = hospital::list_table(&mut self.exec, table)?;
            self.console.show(&rows)?;
        }
        Ok(())
    }

    fn add_doctor(&mut self) -> OpResult {
        self.offer_listing("Display current Doctor table (y/n)? ", Table::Doctor)?;

        let doctor = NewDoctor {
            doctor_id: self
                .console
                .prompt_valid("Please enter Doctor ID: ", validation::id)?,
            name: self
                .console
                .prompt_valid("Please enter Doctor's full name: ", validation::doctor_name)?,
            specialty: self
                .console
                .prompt_valid("Please enter Doctor's specialty: ", validation::specialty)?,
            department_id: self
                .console
                .prompt_valid("Please enter Doctor's Department ID: ", validation::id)?,
        };
        hospital::add_doctor(&mut self.exec, &doctor)?;

        self.offer_listing("Display updated Doctor table (y/n)? ", Table::Doctor)
    }

    fn prompt_patient_details(&mut self) -> CliResult<PatientDetails> {
        Ok(PatientDetails {
            name: self
                .console
                .prompt_valid("Please enter Patient's full name: ", validation::patient_name)?,
            gender: self
                .console
                .prompt_valid("Please enter Patient's gender (M/F): ", validation::gender)?,
            age: self
                .console
                .prompt_valid("Please enter Patient's age: ", validation::age)?,
            address: self
                .console
                .prompt_valid("Please enter Patient's address: ", validation::address)?,
        })
    }

    fn add_patient(&mut self) -> OpResult {
        self.offer_listing("Display current Patient table (y/n)? ", Table::Patient)?;

        let patient_id = self
            .console
            .prompt_valid("Please enter Patient ID: ", validation::id)?;
        let details = self.prompt_patient_details()?;
        let appointment_count = self.console.prompt_valid(
            "Please enter number of appointments under Patient's name: ",
            validation::appointment_count,
        )?;
        hospital::add_patient(
            &mut self.exec,
            &NewPatient {
                patient_id,
                details,
                appointment_count,
            },
        )?;

        self.offer_listing("Display updated Patient table (y/n)? ", Table::Patient)
    }

    fn add_appointment(&mut self) -> OpResult {
        self.offer_listing("Display current Appointment table (y/n)? ", Table::Appointment)?;

        let appointment = NewAppointment {
            appointment_id: self
                .console
                .prompt_valid("Please enter Appointment ID: ", validation::id)?,
            date: self.console.prompt_valid(
                "Please enter date of appointment, using the format MM/DD/YYYY: ",
                validation::date,
            )?,
            time_slot: self.console.prompt_valid(
                "Please enter start and end time of appointment, using the format HH:MM-HH:MM (Note, 17:13 = 5:13 PM): ",
                validation::time_slot,
            )?,
            status: self.console.prompt_valid(
                "Please enter Appointment Status (PA, AC, AV, WL): ",
                validation::status,
            )?,
        };
        hospital::add_appointment(&mut self.exec, &appointment)?;

        self.offer_listing("Display updated Appointment table (y/n)? ", Table::Appointment)
    }

    fn make_appointment(&mut self) -> OpResult {
        let request = BookingRequest {
            patient_id: self
                .console
                .prompt_valid("Please enter Patient ID: ", validation::id)?,
            doctor_id: self
                .console
                .prompt_valid("Please enter Doctor ID: ", validation::id)?,
            appointment_id: self
                .console
                .prompt_valid("Please enter Appointment ID: ", validation::id)?,
        };

        let plan = plan_booking(&mut self.exec, request)?;
        let current = hospital::appointment(&mut self.exec, request.appointment_id)?;
        self.console.show(&current)?;
        self.console.line("")?;
        self.console.line(plan.transition.describe())?;

        let details = if plan.needs_patient_details() {
            self.console
                .line("\nPatient not yet in database, please add patient's information.")?;
            Some(self.prompt_patient_details()?)
        } else {
            None
        };

        let receipt = commit_booking(&mut self.exec, &plan, details.as_ref())?;
        self.metrics.increment_bookings();

        self.console.line("")?;
        let appointment = hospital::appointment(&mut self.exec, request.appointment_id)?;
        self.console.show(&appointment)?;
        let patient = hospital::patient(&mut self.exec, request.patient_id)?;
        self.console.show(&patient)?;
        let search = hospital::search_record(
            &mut self.exec,
            receipt.hospital_id,
            request.patient_id,
            request.appointment_id,
        )?;
        self.console.show(&search)?;
        Ok(())
    }

    fn doctor_appointments(&mut self) -> OpResult {
        let doctor_id = self
            .console
            .prompt_valid("Please enter Doctor ID: ", validation::id)?;
        let start = self.console.prompt_valid(
            "Please enter a start date for your search (MM/DD/YYYY): ",
            validation::date,
        )?;
        let end = self.console.prompt_valid(
            "Please enter an end date for your search (MM/DD/YYYY): ",
            |input: &str| validation::end_date(input, start),
        )?;

        let rows = hospital::doctor_appointments(&mut self.exec, doctor_id, start, end)?;
        self.console.show(&rows)?;
        Ok(())
    }

    fn department_availability(&mut self) -> OpResult {
        let department = self
            .console
            .prompt_valid("Please enter the Department name: ", validation::department_name)?;
        let date = self.console.prompt_valid(
            "Please enter a specified date (MM/DD/YYYY): ",
            validation::date,
        )?;

        let rows = hospital::department_availability(&mut self.exec, &department, date)?;
        self.console.show(&rows)?;
        Ok(())
    }

    fn status_counts(&mut self) -> OpResult {
        let rows = hospital::status_counts_per_doctor(&mut self.exec)?;
        self.console.show(&rows)?;
        Ok(())
    }

    fn patients_per_doctor(&mut self) -> OpResult {
        let status = self.console.prompt_valid(
            "Please enter the appointment status (PA, AC, AV, WL): ",
            validation::status,
        )?;

        let rows = hospital::patients_per_doctor(&mut self.exec, status)?;
        self.console.show(&rows)?;
        Ok(())
    }
}
