//! Main menu

/// One main menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddDoctor,
    AddPatient,
    AddAppointment,
    MakeAppointment,
    DoctorAppointments,
    DepartmentAvailability,
    StatusCounts,
    PatientsPerDoctor,
    Exit,
}

impl MenuChoice {
    /// Menu order
    pub const ALL: [MenuChoice; 9] = [
        MenuChoice::AddDoctor,
        MenuChoice::AddPatient,
        MenuChoice::AddAppointment,
        MenuChoice::MakeAppointment,
        MenuChoice::DoctorAppointments,
        MenuChoice::DepartmentAvailability,
        MenuChoice::StatusCounts,
        MenuChoice::PatientsPerDoctor,
        MenuChoice::Exit,
    ];

    /// 1-based menu number
    pub fn from_number(n: i64) -> Option<Self> {
        if n < 1 {
            return None;
        }
        Self::ALL.get((n - 1) as usize).copied()
    }

    pub fn number(&self) -> usize {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::AddDoctor => "Add Doctor",
            MenuChoice::AddPatient => "Add Patient",
            MenuChoice::AddAppointment => "Add Appointment",
            MenuChoice::MakeAppointment => "Make an Appointment",
            MenuChoice::DoctorAppointments => "List appointments of a given doctor",
            MenuChoice::DepartmentAvailability => {
                "List all available appointments of a given department"
            }
            MenuChoice::StatusCounts => {
                "List total number of different types of appointments per doctor in descending order"
            }
            MenuChoice::PatientsPerDoctor => {
                "Find total number of patients per doctor with a given status"
            }
            MenuChoice::Exit => "< EXIT",
        }
    }

    /// Prefix of the `_BEGIN`/`_COMPLETE`/`_REJECTED`/`_FAILED` log events
    pub fn scope_name(&self) -> &'static str {
        match self {
            MenuChoice::AddDoctor => "ADD_DOCTOR",
            MenuChoice::AddPatient => "ADD_PATIENT",
            MenuChoice::AddAppointment => "ADD_APPOINTMENT",
            MenuChoice::MakeAppointment => "MAKE_APPOINTMENT",
            MenuChoice::DoctorAppointments => "LIST_DOCTOR_APPOINTMENTS",
            MenuChoice::DepartmentAvailability => "LIST_AVAILABLE_BY_DEPARTMENT",
            MenuChoice::StatusCounts => "REPORT_STATUS_COUNTS",
            MenuChoice::PatientsPerDoctor => "REPORT_PATIENTS_PER_DOCTOR",
            MenuChoice::Exit => "EXIT",
        }
    }
}

/// The menu block printed before each choice
pub fn render_menu() -> String {
    let mut text = String::from("MAIN MENU\n---------\n");
    for choice in MenuChoice::ALL {
        text.push_str(&format!("{}. {}\n", choice.number(), choice.label()));
    }
    text
}
