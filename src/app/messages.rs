use std::path::PathBuf;

use iced_aw::date_picker::Date;

use crate::api::types::*;
use crate::api::{ApiError, Page};
use crate::app::state::DayOfWeek;

/// Loader results carry the generation of the request they answer; the
/// update loop commits them through `Remote`, which drops stale ones.
#[derive(Debug, Clone)]
pub enum Message {
    // navigation
    GoToProfile,
    GoToSettings,
    GoToCycles,
    GoToUsers,
    GoToSchedules,
    GoToEnrollment,
    GoToAttendance,
    GoToCotejos,
    Logout,
    LoggedOut(Result<(), ApiError>),
    DismissNotice,

    // login
    EmailChanged(String),
    PasswordChanged(String),
    LoginPressed,
    LoggedIn(Result<UserAccount, ApiError>),

    // profile
    ProfileLoaded(Result<UserAccount, ApiError>),
    ChooseAvatar,
    AvatarChosen(Result<(String, Vec<u8>), String>),
    AvatarUploaded(Result<(), ApiError>),
    AvatarFetched(Result<Vec<u8>, ApiError>),

    // settings
    ThemeSelected(&'static str),
    ApiUrlChanged(String),
    SaveSettings,

    // cascade selectors
    CascadeCyclesLoaded(u64, Result<Vec<SchoolCycle>, ApiError>),
    CascadeGradesLoaded(u64, Result<Vec<Grade>, ApiError>),
    CascadeSectionsLoaded(u64, Result<Vec<Section>, ApiError>),
    CascadeCoursesLoaded(u64, Result<Vec<Course>, ApiError>),
    CascadeTeachersLoaded(u64, Result<Vec<TeacherRef>, ApiError>),
    CyclePicked(SchoolCycle),
    GradePicked(Grade),
    SectionPicked(Section),
    CoursePicked(Course),
    TeacherPicked(TeacherRef),

    // cycles screen
    CyclesLoaded(u64, Result<Vec<SchoolCycle>, ApiError>),
    ShowBimesters(i32),
    BimestersLoaded(u64, Result<Vec<Bimester>, ApiError>),
    ToggleCycleModal(bool),
    StartEditingCycle(SchoolCycle),
    CycleNameChanged(String),
    ChooseCycleStart,
    ChooseCycleEnd,
    SubmitCycleStart(Date),
    SubmitCycleEnd(Date),
    CancelDatePicker,
    SubmitCycle,
    CycleSaved(Result<SchoolCycle, ApiError>),
    CloseCycle(i32),
    CycleClosed(Result<SchoolCycle, ApiError>),
    StartEditingBimester(Bimester),
    CancelEditingBimester,
    BimesterWeeksChanged(String),
    ChooseBimesterStart,
    ChooseBimesterEnd,
    SubmitBimesterStart(Date),
    SubmitBimesterEnd(Date),
    SubmitBimester,
    BimesterSaved(Result<Bimester, ApiError>),

    // users screen
    UsersLoaded(u64, Result<Page<UserAccount>, ApiError>),
    RolesLoaded(u64, Result<Vec<Role>, ApiError>),
    UsersNextPage,
    UsersPreviousPage,
    UserRoleFilterChanged(Option<String>),
    StartEditingUser(UserAccount),
    CancelEditingUser,
    EditUserRoleChanged(Role),
    SubmitUserRole,
    UserRoleSaved(Result<UserAccount, ApiError>),
    ToggleUserActive(i32, bool),
    UserActiveSaved(Result<UserAccount, ApiError>),
    ShowRolePermissions(Role),
    RolePermissionsLoaded(u64, Result<Vec<Permission>, ApiError>),
    ClosePermissionsModal,

    // schedules screen
    SchedulesLoaded(u64, Result<Vec<Schedule>, ApiError>),
    ScheduleDayPicked(DayOfWeek),
    ScheduleStartChanged(String),
    ScheduleEndChanged(String),
    ScheduleClassroomChanged(String),
    SubmitSchedule,
    ScheduleSaved(Result<Schedule, ApiError>),
    DeleteSchedule(i32),
    ScheduleDeleted(Result<(), ApiError>),
    SectionNameChanged(String),
    SectionCapacityChanged(String),
    SubmitSection,
    SectionCreated(Result<Section, ApiError>),

    // enrollment screen
    StudentQueryChanged(String),
    StudentsLoaded(u64, Result<Vec<Student>, ApiError>),
    StudentPicked(Student),
    EnrollmentsLoaded(u64, Result<Vec<Enrollment>, ApiError>),
    SubmitEnrollment,
    EnrollmentSaved(Result<Enrollment, ApiError>),

    // attendance screen
    AttendanceStatusesLoaded(u64, Result<Vec<AttendanceStatus>, ApiError>),
    ChooseAttendanceDate,
    SubmitAttendanceDate(Date),
    AttendanceLoaded(u64, Result<Vec<AttendanceRecord>, ApiError>),
    MarkAttendance(i32, i32),
    SaveAttendance,
    AttendanceSaved(Result<Vec<AttendanceRecord>, ApiError>),
    ExportAttendance,

    // cotejos screen
    BimesterPicked(Bimester),
    CotejosLoaded(u64, Result<Vec<CotejoResponse>, ApiError>),
    CotejoScoreChanged(i32, String),
    SaveCotejoScore(i32),
    CotejoSaved(Result<CotejoResponse, ApiError>),
    ChangeCotejoStatus(i32, CotejoStatus),
    ExportCotejos,

    // reports
    ReportGenerated(Result<PathBuf, String>),
}
