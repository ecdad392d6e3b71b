use std::collections::HashMap;
use std::fmt;

use iced::Theme;
use iced_aw::date_picker::Date;

use crate::api::types::*;
use crate::api::{ApiClient, Page};
use crate::cascade::Cascade;
use crate::config;
use crate::remote::Remote;
use crate::validate::FieldErrors;

#[derive(PartialEq, Default, Clone, Copy)]
pub enum Screen {
    #[default]
    Login,
    Profile,
    Settings,
    Cycles,
    Users,
    Schedules,
    Enrollment,
    Attendance,
    Cotejos,
}

/// Which date picker overlay is open, if any. Only one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePickerOpen {
    #[default]
    None,
    CycleStart,
    CycleEnd,
    BimesterStart,
    BimesterEnd,
    Attendance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayOfWeek {
    pub number: u8,
    pub name: &'static str,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek { number: 1, name: "Lunes" },
        DayOfWeek { number: 2, name: "Martes" },
        DayOfWeek { number: 3, name: "Miércoles" },
        DayOfWeek { number: 4, name: "Jueves" },
        DayOfWeek { number: 5, name: "Viernes" },
        DayOfWeek { number: 6, name: "Sábado" },
        DayOfWeek { number: 7, name: "Domingo" },
    ];

    pub fn from_number(number: u8) -> Option<DayOfWeek> {
        Self::ALL.iter().copied().find(|d| d.number == number)
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

pub struct App {
    pub theme: Theme,
    pub api: ApiClient,
    pub current_screen: Screen,
    pub current_user: Option<UserAccount>,
    /// The current screen's data load came back 403.
    pub no_permission: bool,
    /// Dismissible notice shown over any screen.
    pub notice: Option<String>,
    pub date_picker_open: DatePickerOpen,

    // login
    pub login_email: String,
    pub login_password: String,
    pub login_error: Option<String>,
    pub logging_in: bool,

    // profile
    pub avatar_data: Option<Vec<u8>>,

    // settings
    pub api_url_input: String,

    // shared selector chain (schedules / enrollment / attendance / cotejos)
    pub cascade: Cascade,

    // cycles screen
    pub cycles: Remote<Vec<SchoolCycle>>,
    pub bimesters: Remote<Vec<Bimester>>,
    pub bimesters_cycle: Option<i32>,
    pub show_cycle_modal: bool,
    pub editing_cycle: Option<SchoolCycle>,
    pub cycle_name: String,
    pub cycle_start: Date,
    pub cycle_end: Date,
    pub cycle_errors: FieldErrors,
    pub saving_cycle: bool,
    pub editing_bimester: Option<Bimester>,
    pub bimester_start: Date,
    pub bimester_end: Date,
    pub bimester_weeks: String,
    pub bimester_errors: FieldErrors,
    pub saving_bimester: bool,

    // users screen
    pub users: Remote<Page<UserAccount>>,
    pub users_page: u32,
    pub users_role_filter: Option<String>,
    pub roles: Remote<Vec<Role>>,
    pub editing_user: Option<UserAccount>,
    pub edit_user_role: Option<Role>,
    pub saving_user: bool,
    pub show_permissions_modal: bool,
    pub permissions_role: Option<Role>,
    pub role_permissions: Remote<Vec<Permission>>,

    // schedules screen
    pub schedules: Remote<Vec<Schedule>>,
    pub section_name: String,
    pub section_capacity: String,
    pub section_errors: FieldErrors,
    pub creating_section: bool,
    pub schedule_day: Option<DayOfWeek>,
    pub schedule_start: String,
    pub schedule_end: String,
    pub schedule_classroom: String,
    pub schedule_errors: FieldErrors,
    pub saving_schedule: bool,

    // enrollment screen
    pub student_query: String,
    pub students: Remote<Vec<Student>>,
    pub selected_student: Option<Student>,
    pub enrollments: Remote<Vec<Enrollment>>,
    pub enrollment_errors: FieldErrors,
    pub enrolling: bool,

    // attendance screen
    pub attendance_statuses: Remote<Vec<AttendanceStatus>>,
    pub attendance_date: Date,
    pub attendance_records: Remote<Vec<AttendanceRecord>>,
    /// Unsaved marks, student id -> status id.
    pub attendance_marks: HashMap<i32, i32>,
    pub saving_attendance: bool,

    // cotejos screen
    pub selected_bimester: Option<i32>,
    pub cotejos: Remote<Vec<CotejoResponse>>,
    pub cotejo_score_inputs: HashMap<i32, String>,
    pub cotejo_row_errors: HashMap<i32, String>,
    pub saving_cotejo: bool,
}

impl App {
    pub fn new(config: config::Config, api: ApiClient) -> Self {
        let theme = config::theme_from_str(&config.theme_name).unwrap_or(Theme::Light);
        let api_url_input = api.base_url().to_string();
        Self {
            theme,
            api,
            current_screen: Screen::default(),
            current_user: None,
            no_permission: false,
            notice: None,
            date_picker_open: DatePickerOpen::None,
            login_email: String::new(),
            login_password: String::new(),
            login_error: None,
            logging_in: false,
            avatar_data: None,
            api_url_input,
            cascade: Cascade::new(),
            cycles: Remote::idle(),
            bimesters: Remote::idle(),
            bimesters_cycle: None,
            show_cycle_modal: false,
            editing_cycle: None,
            cycle_name: String::new(),
            cycle_start: Date::today(),
            cycle_end: Date::today(),
            cycle_errors: FieldErrors::default(),
            saving_cycle: false,
            editing_bimester: None,
            bimester_start: Date::today(),
            bimester_end: Date::today(),
            bimester_weeks: String::new(),
            bimester_errors: FieldErrors::default(),
            saving_bimester: false,
            users: Remote::idle(),
            users_page: 1,
            users_role_filter: None,
            roles: Remote::idle(),
            editing_user: None,
            edit_user_role: None,
            saving_user: false,
            show_permissions_modal: false,
            permissions_role: None,
            role_permissions: Remote::idle(),
            schedules: Remote::idle(),
            section_name: String::new(),
            section_capacity: String::new(),
            section_errors: FieldErrors::default(),
            creating_section: false,
            schedule_day: None,
            schedule_start: String::new(),
            schedule_end: String::new(),
            schedule_classroom: String::new(),
            schedule_errors: FieldErrors::default(),
            saving_schedule: false,
            student_query: String::new(),
            students: Remote::idle(),
            selected_student: None,
            enrollments: Remote::idle(),
            enrollment_errors: FieldErrors::default(),
            enrolling: false,
            attendance_statuses: Remote::idle(),
            attendance_date: Date::today(),
            attendance_records: Remote::idle(),
            attendance_marks: HashMap::new(),
            saving_attendance: false,
            selected_bimester: None,
            cotejos: Remote::idle(),
            cotejo_score_inputs: HashMap::new(),
            cotejo_row_errors: HashMap::new(),
            saving_cotejo: false,
        }
    }

    pub fn selected_bimester_ref(&self) -> Option<&Bimester> {
        let id = self.selected_bimester?;
        self.bimesters.items().iter().find(|b| b.id == id)
    }
}
