use chrono::{Datelike, NaiveDate};
use iced::Task;
use iced_aw::date_picker::Date;
use tokio::task::spawn_blocking;
use tracing::{debug, error, warn};

use crate::api::services;
use crate::api::types::*;
use crate::api::ApiError;
use crate::app::state::{DatePickerOpen, Screen};
use crate::cascade::{CascadeFetch, Stage};
use crate::config;
use crate::reports;
use crate::validate::{self, BimesterForm, CycleForm, EnrollmentForm, ScheduleForm, SectionForm};
use super::{App, Message};

fn to_naive(date: Date) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year, date.month, date.day).unwrap_or_default()
}

fn from_naive(date: NaiveDate) -> Date {
    Date::from_ymd(date.year(), date.month(), date.day())
}

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // --- navigation ---
            Message::GoToProfile => self.enter_screen(Screen::Profile),
            Message::GoToSettings => self.enter_screen(Screen::Settings),
            Message::GoToCycles => self.enter_screen(Screen::Cycles),
            Message::GoToUsers => self.enter_screen(Screen::Users),
            Message::GoToSchedules => self.enter_screen(Screen::Schedules),
            Message::GoToEnrollment => self.enter_screen(Screen::Enrollment),
            Message::GoToAttendance => self.enter_screen(Screen::Attendance),
            Message::GoToCotejos => self.enter_screen(Screen::Cotejos),
            Message::Logout => {
                let api = self.api.clone();
                Task::perform(services::logout(api), Message::LoggedOut)
            }
            Message::LoggedOut(result) => {
                if let Err(err) = result {
                    debug!("logout: {err}");
                }
                self.force_login();
                Task::none()
            }
            Message::DismissNotice => {
                self.notice = None;
                Task::none()
            }

            // --- login ---
            Message::EmailChanged(value) => {
                self.login_email = value;
                Task::none()
            }
            Message::PasswordChanged(value) => {
                self.login_password = value;
                Task::none()
            }
            Message::LoginPressed => {
                if self.login_email.trim().is_empty() || self.login_password.is_empty() {
                    self.login_error = Some("Completa el correo y la contraseña".to_string());
                    return Task::none();
                }
                if !validate::is_valid_email(&self.login_email) {
                    self.login_error = Some("Correo inválido".to_string());
                    return Task::none();
                }
                self.login_error = None;
                self.logging_in = true;
                let api = self.api.clone();
                Task::perform(
                    services::login(
                        api,
                        self.login_email.trim().to_string(),
                        self.login_password.clone(),
                    ),
                    Message::LoggedIn,
                )
            }
            Message::LoggedIn(result) => {
                self.logging_in = false;
                match result {
                    Ok(user) => {
                        debug!(user = %user.email, role = %user.role, "sesión iniciada");
                        let avatar_task = match &user.avatar_url {
                            Some(url) => {
                                let api = self.api.clone();
                                Task::perform(
                                    services::fetch_avatar(api, url.clone()),
                                    Message::AvatarFetched,
                                )
                            }
                            None => Task::none(),
                        };
                        self.current_user = Some(user);
                        self.login_password.clear();
                        self.login_error = None;
                        self.current_screen = Screen::Profile;
                        avatar_task
                    }
                    Err(err) => {
                        warn!("inicio de sesión fallido: {err}");
                        self.login_error = Some(err.to_string());
                        Task::none()
                    }
                }
            }

            // --- profile / avatar ---
            Message::ChooseAvatar => Task::perform(
                async move {
                    let result = spawn_blocking(move || {
                        let Some(path) = rfd::FileDialog::new()
                            .add_filter("Imagen", &["png", "jpg", "jpeg"])
                            .pick_file()
                        else {
                            return Err("Selección de imagen cancelada".to_string());
                        };
                        let bytes = std::fs::read(&path)
                            .map_err(|err| format!("No se pudo leer la imagen: {err}"))?;
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| "avatar.png".to_string());
                        Ok((name, bytes))
                    })
                    .await;
                    result.unwrap_or_else(|err| Err(format!("Error al abrir el diálogo: {err}")))
                },
                Message::AvatarChosen,
            ),
            Message::AvatarChosen(result) => match result {
                Ok((name, bytes)) => {
                    self.avatar_data = Some(bytes.clone());
                    let api = self.api.clone();
                    Task::perform(
                        services::upload_avatar(api, name, bytes),
                        Message::AvatarUploaded,
                    )
                }
                Err(message) => {
                    self.notice = Some(message);
                    Task::none()
                }
            },
            Message::AvatarUploaded(result) => match result {
                Ok(()) => {
                    self.notice = Some("Foto de perfil actualizada".to_string());
                    let api = self.api.clone();
                    Task::perform(services::fetch_profile(api), Message::ProfileLoaded)
                }
                Err(err) => {
                    self.mutation_error(err);
                    Task::none()
                }
            },
            Message::ProfileLoaded(result) => match result {
                Ok(user) => {
                    let task = match &user.avatar_url {
                        Some(url) => {
                            let api = self.api.clone();
                            Task::perform(
                                services::fetch_avatar(api, url.clone()),
                                Message::AvatarFetched,
                            )
                        }
                        None => Task::none(),
                    };
                    self.current_user = Some(user);
                    task
                }
                Err(err) => {
                    debug!("perfil no actualizado: {err}");
                    Task::none()
                }
            },
            Message::AvatarFetched(result) => {
                match result {
                    Ok(bytes) => self.avatar_data = Some(bytes),
                    Err(err) => debug!("avatar no disponible: {err}"),
                }
                Task::none()
            }

            // --- settings ---
            Message::ThemeSelected(name) => {
                if let Some(theme) = config::theme_from_str(name) {
                    if let Err(err) = config::save_config(&theme, self.api.base_url()) {
                        warn!("no se pudo guardar la configuración: {err}");
                    }
                    self.theme = theme;
                }
                Task::none()
            }
            Message::ApiUrlChanged(value) => {
                self.api_url_input = value;
                Task::none()
            }
            Message::SaveSettings => {
                // Rebuilding the client drops the cookie store, so keep the
                // current one when the URL did not actually change.
                let entered = self.api_url_input.trim().trim_end_matches('/');
                if entered == self.api.base_url() {
                    if let Err(err) = config::save_config(&self.theme, self.api.base_url()) {
                        warn!("no se pudo guardar la configuración: {err}");
                    }
                    self.notice = Some("Configuración guardada".to_string());
                } else {
                    match crate::api::ApiClient::new(entered) {
                        Ok(api) => {
                            self.api = api;
                            if let Err(err) = config::save_config(&self.theme, self.api.base_url()) {
                                warn!("no se pudo guardar la configuración: {err}");
                            }
                            self.notice = Some("Configuración guardada".to_string());
                        }
                        Err(err) => self.notice = Some(err.to_string()),
                    }
                }
                Task::none()
            }

            // --- cascade ---
            Message::CascadeCyclesLoaded(generation, result) => {
                if let Some(result) = self.intercept(result) {
                    self.cascade.cycles.commit(generation, result);
                }
                Task::none()
            }
            Message::CascadeGradesLoaded(generation, result) => {
                if let Some(result) = self.intercept(result) {
                    self.cascade.grades.commit(generation, result);
                }
                Task::none()
            }
            Message::CascadeSectionsLoaded(generation, result) => {
                if let Some(result) = self.intercept(result) {
                    self.cascade.sections.commit(generation, result);
                }
                Task::none()
            }
            Message::CascadeCoursesLoaded(generation, result) => {
                if let Some(result) = self.intercept(result) {
                    self.cascade.courses.commit(generation, result);
                }
                Task::none()
            }
            Message::CascadeTeachersLoaded(generation, result) => {
                if let Some(result) = self.intercept(result) {
                    self.cascade.teachers.commit(generation, result);
                }
                Task::none()
            }
            Message::CyclePicked(cycle) => {
                let fetch = self.cascade.set_cycle(Some(cycle.id));
                let mut tasks = vec![self.run_cascade(fetch)];
                if self.current_screen == Screen::Cotejos {
                    self.selected_bimester = None;
                    self.bimesters_cycle = Some(cycle.id);
                    let generation = self.bimesters.begin();
                    let api = self.api.clone();
                    tasks.push(Task::perform(
                        services::list_bimesters(api, cycle.id),
                        move |r| Message::BimestersLoaded(generation, r),
                    ));
                }
                Task::batch(tasks)
            }
            Message::GradePicked(grade) => {
                let fetch = self.cascade.set_grade(Some(grade.id));
                self.run_cascade(fetch)
            }
            Message::SectionPicked(section) => {
                let fetch = self.cascade.set_section(Some(section.id));
                let mut tasks = vec![self.run_cascade(fetch)];
                match self.current_screen {
                    Screen::Schedules => tasks.push(self.reload_schedules()),
                    Screen::Enrollment => tasks.push(self.reload_enrollments()),
                    Screen::Attendance => {
                        self.attendance_marks.clear();
                        tasks.push(self.reload_enrollments());
                        tasks.push(self.reload_attendance());
                    }
                    Screen::Cotejos => tasks.push(self.reload_cotejos()),
                    _ => {}
                }
                Task::batch(tasks)
            }
            Message::CoursePicked(course) => {
                let fetch = self.cascade.set_course(Some(course.id));
                let mut tasks = vec![self.run_cascade(fetch)];
                if self.current_screen == Screen::Cotejos {
                    tasks.push(self.reload_cotejos());
                }
                Task::batch(tasks)
            }
            Message::TeacherPicked(teacher) => {
                self.cascade.set_teacher(Some(teacher.id));
                Task::none()
            }

            // --- cycles screen ---
            Message::CyclesLoaded(generation, result) => {
                if let Some(result) = self.intercept(result) {
                    self.cycles.commit(generation, result);
                }
                Task::none()
            }
            Message::ShowBimesters(cycle_id) => {
                self.bimesters_cycle = Some(cycle_id);
                let generation = self.bimesters.begin();
                let api = self.api.clone();
                Task::perform(services::list_bimesters(api, cycle_id), move |r| {
                    Message::BimestersLoaded(generation, r)
                })
            }
            Message::BimestersLoaded(generation, result) => {
                if let Some(result) = self.intercept(result) {
                    self.bimesters.commit(generation, result);
                }
                Task::none()
            }
            Message::ToggleCycleModal(show) => {
                self.show_cycle_modal = show;
                if !show {
                    self.editing_cycle = None;
                    self.cycle_errors = Default::default();
                }
                self.cycle_name.clear();
                self.cycle_start = Date::today();
                self.cycle_end = Date::today();
                Task::none()
            }
            Message::StartEditingCycle(cycle) => {
                self.cycle_name = cycle.name.clone();
                self.cycle_start = from_naive(cycle.start_date);
                self.cycle_end = from_naive(cycle.end_date);
                self.editing_cycle = Some(cycle);
                self.cycle_errors = Default::default();
                self.show_cycle_modal = true;
                Task::none()
            }
            Message::CycleNameChanged(value) => {
                self.cycle_name = value;
                Task::none()
            }
            Message::ChooseCycleStart => {
                self.date_picker_open = DatePickerOpen::CycleStart;
                Task::none()
            }
            Message::ChooseCycleEnd => {
                self.date_picker_open = DatePickerOpen::CycleEnd;
                Task::none()
            }
            Message::SubmitCycleStart(date) => {
                self.cycle_start = date;
                self.date_picker_open = DatePickerOpen::None;
                Task::none()
            }
            Message::SubmitCycleEnd(date) => {
                self.cycle_end = date;
                self.date_picker_open = DatePickerOpen::None;
                Task::none()
            }
            Message::CancelDatePicker => {
                self.date_picker_open = DatePickerOpen::None;
                Task::none()
            }
            Message::SubmitCycle => {
                let form = CycleForm {
                    name: self.cycle_name.clone(),
                    start_date: to_naive(self.cycle_start),
                    end_date: to_naive(self.cycle_end),
                };
                match form.validate() {
                    Ok(payload) => {
                        self.cycle_errors = Default::default();
                        self.saving_cycle = true;
                        let api = self.api.clone();
                        match &self.editing_cycle {
                            Some(cycle) => Task::perform(
                                services::update_cycle(api, cycle.id, payload),
                                Message::CycleSaved,
                            ),
                            None => Task::perform(
                                services::create_cycle(api, payload),
                                Message::CycleSaved,
                            ),
                        }
                    }
                    Err(errors) => {
                        self.cycle_errors = errors;
                        Task::none()
                    }
                }
            }
            Message::CycleSaved(result) => {
                self.saving_cycle = false;
                match result {
                    Ok(_) => {
                        self.show_cycle_modal = false;
                        self.editing_cycle = None;
                        self.cycle_name.clear();
                        self.reload_cycles()
                    }
                    Err(err) => {
                        // Modal stays open with the form intact.
                        self.mutation_error(err);
                        Task::none()
                    }
                }
            }
            Message::CloseCycle(cycle_id) => {
                let api = self.api.clone();
                Task::perform(services::close_cycle(api, cycle_id), Message::CycleClosed)
            }
            Message::CycleClosed(result) => match result {
                Ok(_) => self.reload_cycles(),
                Err(err) => {
                    self.mutation_error(err);
                    Task::none()
                }
            },
            Message::StartEditingBimester(bimester) => {
                self.bimester_start = from_naive(bimester.start_date);
                self.bimester_end = from_naive(bimester.end_date);
                self.bimester_weeks = bimester.weeks_count.to_string();
                self.bimester_errors = Default::default();
                self.editing_bimester = Some(bimester);
                Task::none()
            }
            Message::CancelEditingBimester => {
                self.editing_bimester = None;
                self.bimester_errors = Default::default();
                Task::none()
            }
            Message::BimesterWeeksChanged(value) => {
                self.bimester_weeks = value;
                Task::none()
            }
            Message::ChooseBimesterStart => {
                self.date_picker_open = DatePickerOpen::BimesterStart;
                Task::none()
            }
            Message::ChooseBimesterEnd => {
                self.date_picker_open = DatePickerOpen::BimesterEnd;
                Task::none()
            }
            Message::SubmitBimesterStart(date) => {
                self.bimester_start = date;
                self.date_picker_open = DatePickerOpen::None;
                Task::none()
            }
            Message::SubmitBimesterEnd(date) => {
                self.bimester_end = date;
                self.date_picker_open = DatePickerOpen::None;
                Task::none()
            }
            Message::SubmitBimester => {
                let Some(bimester) = self.editing_bimester.clone() else {
                    return Task::none();
                };
                let form = BimesterForm {
                    number: bimester.number,
                    start_date: to_naive(self.bimester_start),
                    end_date: to_naive(self.bimester_end),
                    weeks_text: self.bimester_weeks.clone(),
                };
                match form.validate() {
                    Ok(payload) => {
                        self.bimester_errors = Default::default();
                        self.saving_bimester = true;
                        let api = self.api.clone();
                        Task::perform(
                            services::update_bimester(api, bimester.id, payload),
                            Message::BimesterSaved,
                        )
                    }
                    Err(errors) => {
                        self.bimester_errors = errors;
                        Task::none()
                    }
                }
            }
            Message::BimesterSaved(result) => {
                self.saving_bimester = false;
                match result {
                    Ok(_) => {
                        self.editing_bimester = None;
                        match self.bimesters_cycle {
                            Some(cycle_id) => self.update(Message::ShowBimesters(cycle_id)),
                            None => Task::none(),
                        }
                    }
                    Err(err) => {
                        self.mutation_error(err);
                        Task::none()
                    }
                }
            }

            // --- users screen ---
            Message::UsersLoaded(generation, result) => {
                if let Some(result) = self.intercept(result) {
                    self.users.commit(generation, result);
                }
                Task::none()
            }
            Message::RolesLoaded(generation, result) => {
                if let Some(result) = self.intercept(result) {
                    self.roles.commit(generation, result);
                }
                Task::none()
            }
            Message::UsersNextPage => {
                let has_next = self
                    .users
                    .data()
                    .map(|p| p.meta.has_next_page)
                    .unwrap_or(false);
                if has_next {
                    self.users_page += 1;
                    self.reload_users()
                } else {
                    Task::none()
                }
            }
            Message::UsersPreviousPage => {
                if self.users_page > 1 {
                    self.users_page -= 1;
                    self.reload_users()
                } else {
                    Task::none()
                }
            }
            Message::UserRoleFilterChanged(filter) => {
                self.users_role_filter = filter;
                self.users_page = 1;
                self.reload_users()
            }
            Message::StartEditingUser(user) => {
                self.edit_user_role = self
                    .roles
                    .items()
                    .iter()
                    .find(|r| r.name == user.role)
                    .cloned();
                self.editing_user = Some(user);
                Task::none()
            }
            Message::CancelEditingUser => {
                self.editing_user = None;
                self.edit_user_role = None;
                Task::none()
            }
            Message::EditUserRoleChanged(role) => {
                self.edit_user_role = Some(role);
                Task::none()
            }
            Message::SubmitUserRole => {
                let Some(user_id) = self.editing_user.as_ref().map(|u| u.id) else {
                    return Task::none();
                };
                let Some(role_id) = self.edit_user_role.as_ref().map(|r| r.id) else {
                    return Task::none();
                };
                self.saving_user = true;
                let api = self.api.clone();
                Task::perform(
                    services::change_user_role(api, user_id, role_id),
                    Message::UserRoleSaved,
                )
            }
            Message::UserRoleSaved(result) => {
                self.saving_user = false;
                match result {
                    Ok(_) => {
                        self.editing_user = None;
                        self.edit_user_role = None;
                        self.reload_users()
                    }
                    Err(err) => {
                        self.mutation_error(err);
                        Task::none()
                    }
                }
            }
            Message::ToggleUserActive(user_id, active) => {
                let api = self.api.clone();
                Task::perform(
                    services::set_user_active(api, user_id, active),
                    Message::UserActiveSaved,
                )
            }
            Message::UserActiveSaved(result) => match result {
                Ok(_) => self.reload_users(),
                Err(err) => {
                    self.mutation_error(err);
                    Task::none()
                }
            },
            Message::ShowRolePermissions(role) => {
                self.show_permissions_modal = true;
                let generation = self.role_permissions.begin();
                let api = self.api.clone();
                let role_id = role.id;
                self.permissions_role = Some(role);
                Task::perform(services::list_role_permissions(api, role_id), move |r| {
                    Message::RolePermissionsLoaded(generation, r)
                })
            }
            Message::RolePermissionsLoaded(generation, result) => {
                if let Some(result) = self.intercept(result) {
                    self.role_permissions.commit(generation, result);
                }
                Task::none()
            }
            Message::ClosePermissionsModal => {
                self.show_permissions_modal = false;
                self.permissions_role = None;
                self.role_permissions.reset();
                Task::none()
            }

            // --- schedules screen ---
            Message::SchedulesLoaded(generation, result) => {
                if let Some(result) = self.intercept(result) {
                    self.schedules.commit(generation, result);
                }
                Task::none()
            }
            Message::ScheduleDayPicked(day) => {
                self.schedule_day = Some(day);
                Task::none()
            }
            Message::ScheduleStartChanged(value) => {
                self.schedule_start = value;
                Task::none()
            }
            Message::ScheduleEndChanged(value) => {
                self.schedule_end = value;
                Task::none()
            }
            Message::ScheduleClassroomChanged(value) => {
                self.schedule_classroom = value;
                Task::none()
            }
            Message::SubmitSchedule => {
                let form = ScheduleForm {
                    section_id: self.cascade.section(),
                    course_id: self.cascade.course(),
                    teacher_id: self.cascade.teacher(),
                    day_of_week: self.schedule_day.map(|d| d.number),
                    start_time: self.schedule_start.clone(),
                    end_time: self.schedule_end.clone(),
                    classroom: self.schedule_classroom.clone(),
                };
                match form.validate() {
                    Ok(payload) => {
                        self.schedule_errors = Default::default();
                        self.saving_schedule = true;
                        let api = self.api.clone();
                        Task::perform(
                            services::create_schedule(api, payload),
                            Message::ScheduleSaved,
                        )
                    }
                    Err(errors) => {
                        // No request leaves the client on a validation error.
                        self.schedule_errors = errors;
                        Task::none()
                    }
                }
            }
            Message::ScheduleSaved(result) => {
                self.saving_schedule = false;
                match result {
                    Ok(_) => {
                        self.schedule_day = None;
                        self.schedule_start.clear();
                        self.schedule_end.clear();
                        self.schedule_classroom.clear();
                        self.reload_schedules()
                    }
                    Err(err) => {
                        // The form stays populated for a retry.
                        self.mutation_error(err);
                        Task::none()
                    }
                }
            }
            Message::DeleteSchedule(schedule_id) => {
                let api = self.api.clone();
                Task::perform(
                    services::delete_schedule(api, schedule_id),
                    Message::ScheduleDeleted,
                )
            }
            Message::ScheduleDeleted(result) => match result {
                Ok(()) => self.reload_schedules(),
                Err(err) => {
                    self.mutation_error(err);
                    Task::none()
                }
            },
            Message::SectionNameChanged(value) => {
                self.section_name = value;
                Task::none()
            }
            Message::SectionCapacityChanged(value) => {
                self.section_capacity = value;
                Task::none()
            }
            Message::SubmitSection => {
                let form = SectionForm {
                    name: self.section_name.clone(),
                    capacity_text: self.section_capacity.clone(),
                    grade_id: self.cascade.grade(),
                    teacher_id: None,
                };
                match form.validate() {
                    Ok(payload) => {
                        self.section_errors = Default::default();
                        self.creating_section = true;
                        let api = self.api.clone();
                        Task::perform(
                            services::create_section(api, payload),
                            Message::SectionCreated,
                        )
                    }
                    Err(errors) => {
                        self.section_errors = errors;
                        Task::none()
                    }
                }
            }
            Message::SectionCreated(result) => {
                self.creating_section = false;
                match result {
                    Ok(_) => {
                        self.section_name.clear();
                        self.section_capacity.clear();
                        let fetch = self.cascade.refresh_sections();
                        self.run_cascade(fetch)
                    }
                    Err(err) => {
                        self.mutation_error(err);
                        Task::none()
                    }
                }
            }

            // --- enrollment screen ---
            Message::StudentQueryChanged(value) => {
                self.student_query = value;
                self.selected_student = None;
                let query = self.student_query.trim().to_string();
                if query.len() < 2 {
                    self.students.reset();
                    return Task::none();
                }
                let generation = self.students.begin();
                let api = self.api.clone();
                Task::perform(services::search_students(api, query), move |r| {
                    Message::StudentsLoaded(generation, r)
                })
            }
            Message::StudentsLoaded(generation, result) => {
                if let Some(result) = self.intercept(result) {
                    self.students.commit(generation, result);
                }
                Task::none()
            }
            Message::StudentPicked(student) => {
                self.selected_student = Some(student);
                Task::none()
            }
            Message::EnrollmentsLoaded(generation, result) => {
                if let Some(result) = self.intercept(result) {
                    self.enrollments.commit(generation, result);
                }
                Task::none()
            }
            Message::SubmitEnrollment => {
                let form = EnrollmentForm {
                    student_id: self.selected_student.as_ref().map(|s| s.id),
                    section_id: self.cascade.section(),
                    cycle_id: self.cascade.cycle(),
                };
                match form.validate() {
                    Ok(payload) => {
                        self.enrollment_errors = Default::default();
                        self.enrolling = true;
                        let api = self.api.clone();
                        Task::perform(
                            services::create_enrollment(api, payload),
                            Message::EnrollmentSaved,
                        )
                    }
                    Err(errors) => {
                        self.enrollment_errors = errors;
                        Task::none()
                    }
                }
            }
            Message::EnrollmentSaved(result) => {
                self.enrolling = false;
                match result {
                    Ok(_) => {
                        self.selected_student = None;
                        self.student_query.clear();
                        self.students.reset();
                        self.reload_enrollments()
                    }
                    Err(err) => {
                        self.mutation_error(err);
                        Task::none()
                    }
                }
            }

            // --- attendance screen ---
            Message::AttendanceStatusesLoaded(generation, result) => {
                if let Some(result) = self.intercept(result) {
                    self.attendance_statuses.commit(generation, result);
                }
                Task::none()
            }
            Message::ChooseAttendanceDate => {
                self.date_picker_open = DatePickerOpen::Attendance;
                Task::none()
            }
            Message::SubmitAttendanceDate(date) => {
                self.attendance_date = date;
                self.date_picker_open = DatePickerOpen::None;
                self.attendance_marks.clear();
                self.reload_attendance()
            }
            Message::AttendanceLoaded(generation, result) => {
                if let Some(result) = self.intercept(result) {
                    if self.attendance_records.commit(generation, result) {
                        // Saved records become the editable baseline.
                        self.attendance_marks = self
                            .attendance_records
                            .items()
                            .iter()
                            .map(|r| (r.student_id, r.status_id))
                            .collect();
                    }
                }
                Task::none()
            }
            Message::MarkAttendance(student_id, status_id) => {
                self.attendance_marks.insert(student_id, status_id);
                Task::none()
            }
            Message::SaveAttendance => {
                let Some(section_id) = self.cascade.section() else {
                    return Task::none();
                };
                if self.attendance_marks.is_empty() {
                    self.notice = Some("No hay asistencia que guardar".to_string());
                    return Task::none();
                }
                let date = to_naive(self.attendance_date);
                let course_id = self.cascade.course();
                let records: Vec<AttendanceRecord> = self
                    .attendance_marks
                    .iter()
                    .map(|(&student_id, &status_id)| AttendanceRecord {
                        student_id,
                        section_id,
                        course_id,
                        date,
                        status_id,
                    })
                    .collect();
                self.saving_attendance = true;
                let api = self.api.clone();
                Task::perform(services::save_attendance(api, records), Message::AttendanceSaved)
            }
            Message::AttendanceSaved(result) => {
                self.saving_attendance = false;
                match result {
                    Ok(_) => {
                        self.notice = Some("Asistencia guardada".to_string());
                        self.reload_attendance()
                    }
                    Err(err) => {
                        self.mutation_error(err);
                        Task::none()
                    }
                }
            }
            Message::ExportAttendance => {
                let Some(section) = self.cascade.selected_section().cloned() else {
                    return Task::none();
                };
                let date = to_naive(self.attendance_date);
                let enrollments = self.enrollments.items().to_vec();
                let records = self.attendance_records.items().to_vec();
                let statuses = self.attendance_statuses.items().to_vec();
                Task::perform(
                    async move {
                        spawn_blocking(move || {
                            reports::attendance_report(
                                &section.name,
                                date,
                                &enrollments,
                                &records,
                                &statuses,
                            )
                        })
                        .await
                        .unwrap_or_else(|err| Err(format!("Error al generar el reporte: {err}")))
                    },
                    Message::ReportGenerated,
                )
            }

            // --- cotejos screen ---
            Message::BimesterPicked(bimester) => {
                self.selected_bimester = Some(bimester.id);
                self.reload_cotejos()
            }
            Message::CotejosLoaded(generation, result) => {
                if let Some(result) = self.intercept(result) {
                    if self.cotejos.commit(generation, result) {
                        self.cotejo_score_inputs = self
                            .cotejos
                            .items()
                            .iter()
                            .map(|c| {
                                let text = c.score.map(|s| format!("{s:.2}")).unwrap_or_default();
                                (c.id, text)
                            })
                            .collect();
                        self.cotejo_row_errors.clear();
                    }
                }
                Task::none()
            }
            Message::CotejoScoreChanged(cotejo_id, value) => {
                self.cotejo_score_inputs.insert(cotejo_id, value);
                self.cotejo_row_errors.remove(&cotejo_id);
                Task::none()
            }
            Message::SaveCotejoScore(cotejo_id) => {
                let text = self
                    .cotejo_score_inputs
                    .get(&cotejo_id)
                    .cloned()
                    .unwrap_or_default();
                match validate::parse_score(&text) {
                    Ok(score) => {
                        self.saving_cotejo = true;
                        let api = self.api.clone();
                        Task::perform(
                            services::save_cotejo_score(api, cotejo_id, score),
                            Message::CotejoSaved,
                        )
                    }
                    Err(message) => {
                        self.cotejo_row_errors.insert(cotejo_id, message);
                        Task::none()
                    }
                }
            }
            Message::CotejoSaved(result) => {
                self.saving_cotejo = false;
                match result {
                    Ok(_) => self.reload_cotejos(),
                    Err(err) => {
                        self.mutation_error(err);
                        Task::none()
                    }
                }
            }
            Message::ChangeCotejoStatus(cotejo_id, status) => {
                let api = self.api.clone();
                Task::perform(
                    services::change_cotejo_status(api, cotejo_id, status),
                    Message::CotejoSaved,
                )
            }
            Message::ExportCotejos => {
                let Some(section) = self.cascade.selected_section().cloned() else {
                    return Task::none();
                };
                let Some(course) = self.cascade.selected_course().cloned() else {
                    return Task::none();
                };
                let Some(bimester_number) = self.selected_bimester_ref().map(|b| b.number) else {
                    return Task::none();
                };
                let cotejos = self.cotejos.items().to_vec();
                Task::perform(
                    async move {
                        spawn_blocking(move || {
                            reports::cotejo_report(
                                &section.name,
                                &course.name,
                                bimester_number,
                                &cotejos,
                            )
                        })
                        .await
                        .unwrap_or_else(|err| Err(format!("Error al generar el reporte: {err}")))
                    },
                    Message::ReportGenerated,
                )
            }

            // --- reports ---
            Message::ReportGenerated(result) => {
                match result {
                    Ok(path) => {
                        self.notice = Some(format!("Reporte generado: {}", path.display()));
                        if let Err(err) = open::that(&path) {
                            debug!("no se pudo abrir el reporte: {err}");
                        }
                    }
                    Err(message) => {
                        error!("reporte fallido: {message}");
                        self.notice = Some(message);
                    }
                }
                Task::none()
            }
        }
    }

    /// Screen switch: clears the stale per-screen state and kicks off the
    /// loads the new screen needs.
    fn enter_screen(&mut self, screen: Screen) -> Task<Message> {
        self.current_screen = screen;
        self.no_permission = false;
        self.notice = None;
        match screen {
            Screen::Login | Screen::Profile | Screen::Settings => Task::none(),
            Screen::Cycles => {
                self.bimesters.reset();
                self.bimesters_cycle = None;
                self.reload_cycles()
            }
            Screen::Users => {
                self.users_page = 1;
                let roles_generation = self.roles.begin();
                let api = self.api.clone();
                Task::batch([
                    self.reload_users(),
                    Task::perform(services::list_roles(api), move |r| {
                        Message::RolesLoaded(roles_generation, r)
                    }),
                ])
            }
            Screen::Schedules | Screen::Enrollment | Screen::Attendance | Screen::Cotejos => {
                self.cascade.reset();
                self.schedules.reset();
                self.enrollments.reset();
                self.attendance_records.reset();
                self.attendance_marks.clear();
                self.cotejos.reset();
                self.selected_bimester = None;
                self.bimesters.reset();
                self.bimesters_cycle = None;
                let generation = self.cascade.begin_cycles();
                let api = self.api.clone();
                let mut tasks = vec![Task::perform(services::list_cycles(api), move |r| {
                    Message::CascadeCyclesLoaded(generation, r)
                })];
                if screen == Screen::Attendance {
                    let generation = self.attendance_statuses.begin();
                    let api = self.api.clone();
                    tasks.push(Task::perform(
                        services::list_attendance_statuses(api),
                        move |r| Message::AttendanceStatusesLoaded(generation, r),
                    ));
                }
                Task::batch(tasks)
            }
        }
    }

    /// Turns a cascade fetch plan into the matching service call.
    fn run_cascade(&mut self, fetch: Option<CascadeFetch>) -> Task<Message> {
        let Some(fetch) = fetch else {
            return Task::none();
        };
        let api = self.api.clone();
        let generation = fetch.generation;
        match fetch.stage {
            Stage::Grades => Task::perform(services::list_grades(api, fetch.parent_id), move |r| {
                Message::CascadeGradesLoaded(generation, r)
            }),
            Stage::Sections => {
                Task::perform(services::list_sections(api, fetch.parent_id), move |r| {
                    Message::CascadeSectionsLoaded(generation, r)
                })
            }
            Stage::Courses => {
                Task::perform(services::list_courses(api, fetch.parent_id), move |r| {
                    Message::CascadeCoursesLoaded(generation, r)
                })
            }
            Stage::Teachers => {
                Task::perform(services::list_teachers(api, fetch.parent_id), move |r| {
                    Message::CascadeTeachersLoaded(generation, r)
                })
            }
        }
    }

    fn reload_cycles(&mut self) -> Task<Message> {
        let generation = self.cycles.begin();
        let api = self.api.clone();
        Task::perform(services::list_cycles(api), move |r| {
            Message::CyclesLoaded(generation, r)
        })
    }

    fn reload_users(&mut self) -> Task<Message> {
        let generation = self.users.begin();
        let api = self.api.clone();
        Task::perform(
            services::list_users(api, self.users_page, self.users_role_filter.clone()),
            move |r| Message::UsersLoaded(generation, r),
        )
    }

    fn reload_schedules(&mut self) -> Task<Message> {
        let Some(section_id) = self.cascade.section() else {
            self.schedules.reset();
            return Task::none();
        };
        let generation = self.schedules.begin();
        let api = self.api.clone();
        Task::perform(services::list_schedules(api, section_id), move |r| {
            Message::SchedulesLoaded(generation, r)
        })
    }

    fn reload_enrollments(&mut self) -> Task<Message> {
        let Some(section_id) = self.cascade.section() else {
            self.enrollments.reset();
            return Task::none();
        };
        let generation = self.enrollments.begin();
        let api = self.api.clone();
        Task::perform(services::list_enrollments(api, section_id), move |r| {
            Message::EnrollmentsLoaded(generation, r)
        })
    }

    fn reload_attendance(&mut self) -> Task<Message> {
        let Some(section_id) = self.cascade.section() else {
            self.attendance_records.reset();
            return Task::none();
        };
        let date = to_naive(self.attendance_date);
        let generation = self.attendance_records.begin();
        let api = self.api.clone();
        Task::perform(services::list_attendance(api, section_id, date), move |r| {
            Message::AttendanceLoaded(generation, r)
        })
    }

    fn reload_cotejos(&mut self) -> Task<Message> {
        let (Some(section_id), Some(course_id), Some(bimester_id)) = (
            self.cascade.section(),
            self.cascade.course(),
            self.selected_bimester,
        ) else {
            self.cotejos.reset();
            return Task::none();
        };
        let generation = self.cotejos.begin();
        let api = self.api.clone();
        Task::perform(
            services::list_cotejos(api, section_id, course_id, bimester_id),
            move |r| Message::CotejosLoaded(generation, r),
        )
    }

    /// Classifies a loader error. Session loss and missing permission are
    /// handled globally; anything else becomes the inline message for the
    /// `Remote` that asked.
    fn intercept<T>(&mut self, result: Result<T, ApiError>) -> Option<Result<T, String>> {
        match result {
            Ok(data) => Some(Ok(data)),
            Err(ApiError::Unauthorized) => {
                self.force_login();
                None
            }
            Err(ApiError::Forbidden) => {
                // The remote still settles, so nothing keeps spinning behind
                // the no-permission view.
                self.no_permission = true;
                Some(Err(ApiError::Forbidden.to_string()))
            }
            Err(err) => Some(Err(err.to_string())),
        }
    }

    /// Mutation failures keep the form populated and surface a notice.
    fn mutation_error(&mut self, err: ApiError) {
        match err {
            ApiError::Unauthorized => self.force_login(),
            other => {
                warn!("operación fallida: {other}");
                self.notice = Some(other.to_string());
            }
        }
    }

    fn force_login(&mut self) {
        self.current_user = None;
        self.avatar_data = None;
        self.login_password.clear();
        self.login_error = Some("Tu sesión expiró, vuelve a iniciar sesión".to_string());
        self.current_screen = Screen::Login;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::config::Config;

    fn app() -> App {
        let api = ApiClient::new("http://localhost:4000/api").expect("client");
        App::new(Config::default(), api)
    }

    #[test]
    fn invalid_schedule_form_sets_field_errors_without_saving() {
        let mut app = app();
        let _ = app.update(Message::SubmitSchedule);
        assert!(!app.schedule_errors.is_empty());
        assert!(!app.saving_schedule);
    }

    #[test]
    fn empty_login_is_rejected_locally() {
        let mut app = app();
        let _ = app.update(Message::LoginPressed);
        assert!(app.login_error.is_some());
        assert!(!app.logging_in);
    }

    #[test]
    fn unauthorized_loader_forces_login() {
        let mut app = app();
        app.current_screen = Screen::Cycles;
        let generation = app.cycles.begin();
        let _ = app.update(Message::CyclesLoaded(generation, Err(ApiError::Unauthorized)));
        assert!(app.current_screen == Screen::Login);
        assert!(app.current_user.is_none());
    }

    #[test]
    fn forbidden_loader_flags_no_permission() {
        let mut app = app();
        app.current_screen = Screen::Cycles;
        let generation = app.cycles.begin();
        let _ = app.update(Message::CyclesLoaded(generation, Err(ApiError::Forbidden)));
        assert!(app.no_permission);
        assert!(app.current_screen == Screen::Cycles);
        // The list settles instead of staying in flight forever.
        assert!(!app.cycles.is_loading());
        assert!(app.cycles.error().is_some());
    }

    #[test]
    fn saving_unchanged_api_url_keeps_the_session_client() {
        let mut app = app();
        app.api_url_input = "http://localhost:4000/api/".to_string();
        let _ = app.update(Message::SaveSettings);
        assert_eq!(app.api.base_url(), "http://localhost:4000/api");
        assert_eq!(app.notice.as_deref(), Some("Configuración guardada"));
    }

    #[test]
    fn saving_new_api_url_switches_the_client() {
        let mut app = app();
        app.api_url_input = "http://backend:5000/api".to_string();
        let _ = app.update(Message::SaveSettings);
        assert_eq!(app.api.base_url(), "http://backend:5000/api");
    }

    #[test]
    fn failed_mutation_keeps_the_form_and_shows_the_message() {
        let mut app = app();
        app.schedule_start = "08:00".to_string();
        let _ = app.update(Message::ScheduleSaved(Err(ApiError::Api {
            message: "Conflicto de horario".to_string(),
        })));
        assert_eq!(app.notice.as_deref(), Some("Conflicto de horario"));
        assert_eq!(app.schedule_start, "08:00");
        assert!(!app.saving_schedule);
    }

    #[test]
    fn marking_attendance_is_local_until_saved() {
        let mut app = app();
        let _ = app.update(Message::MarkAttendance(5, 2));
        let _ = app.update(Message::MarkAttendance(5, 3));
        assert_eq!(app.attendance_marks.get(&5), Some(&3));
        assert!(!app.saving_attendance);
    }
}
