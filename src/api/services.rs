//! Thin endpoint wrappers. Each function owns its arguments so the update
//! loop can hand it straight to `Task::perform`.

use chrono::NaiveDate;
use serde_json::json;

use super::types::*;
use super::{ApiClient, ApiError, Page};

// --- auth / profile ---

pub async fn login(api: ApiClient, email: String, password: String) -> Result<UserAccount, ApiError> {
    api.post("auth/login", &json!({ "email": email, "password": password }))
        .await
}

pub async fn logout(api: ApiClient) -> Result<(), ApiError> {
    let _: serde_json::Value = api.post("auth/logout", &json!({})).await?;
    Ok(())
}

pub async fn fetch_profile(api: ApiClient) -> Result<UserAccount, ApiError> {
    api.get("auth/me").await
}

pub async fn upload_avatar(api: ApiClient, file_name: String, bytes: Vec<u8>) -> Result<(), ApiError> {
    api.upload("users/me/avatar", "file", file_name, bytes).await
}

pub async fn fetch_avatar(api: ApiClient, url: String) -> Result<Vec<u8>, ApiError> {
    api.fetch_bytes(&url).await
}

// --- cycles / bimesters ---

pub async fn list_cycles(api: ApiClient) -> Result<Vec<SchoolCycle>, ApiError> {
    api.get("cycles").await
}

pub async fn create_cycle(api: ApiClient, payload: CyclePayload) -> Result<SchoolCycle, ApiError> {
    api.post("cycles", &payload).await
}

pub async fn update_cycle(
    api: ApiClient,
    cycle_id: i32,
    payload: CyclePayload,
) -> Result<SchoolCycle, ApiError> {
    api.put(&format!("cycles/{cycle_id}"), &payload).await
}

pub async fn close_cycle(api: ApiClient, cycle_id: i32) -> Result<SchoolCycle, ApiError> {
    api.put(&format!("cycles/{cycle_id}/close"), &json!({})).await
}

pub async fn list_bimesters(api: ApiClient, cycle_id: i32) -> Result<Vec<Bimester>, ApiError> {
    api.get(&format!("cycles/{cycle_id}/bimesters")).await
}

pub async fn update_bimester(
    api: ApiClient,
    bimester_id: i32,
    payload: BimesterPayload,
) -> Result<Bimester, ApiError> {
    api.put(&format!("bimesters/{bimester_id}"), &payload).await
}

// --- cascade stages ---

pub async fn list_grades(api: ApiClient, cycle_id: i32) -> Result<Vec<Grade>, ApiError> {
    api.get_query("grades", &[("cycleId", cycle_id.to_string())])
        .await
}

pub async fn list_sections(api: ApiClient, grade_id: i32) -> Result<Vec<Section>, ApiError> {
    api.get_query("sections", &[("gradeId", grade_id.to_string())])
        .await
}

pub async fn list_courses(api: ApiClient, grade_id: i32) -> Result<Vec<Course>, ApiError> {
    api.get_query("courses", &[("gradeId", grade_id.to_string())])
        .await
}

pub async fn list_teachers(api: ApiClient, course_id: i32) -> Result<Vec<TeacherRef>, ApiError> {
    api.get_query("teachers", &[("courseId", course_id.to_string())])
        .await
}

// --- schedules ---

pub async fn list_schedules(api: ApiClient, section_id: i32) -> Result<Vec<Schedule>, ApiError> {
    api.get_query("schedules", &[("sectionId", section_id.to_string())])
        .await
}

pub async fn create_schedule(api: ApiClient, payload: SchedulePayload) -> Result<Schedule, ApiError> {
    api.post("schedules", &payload).await
}

pub async fn delete_schedule(api: ApiClient, schedule_id: i32) -> Result<(), ApiError> {
    api.delete(&format!("schedules/{schedule_id}")).await
}

// --- sections admin ---

pub async fn create_section(api: ApiClient, payload: SectionPayload) -> Result<Section, ApiError> {
    api.post("sections", &payload).await
}

// --- students / enrollment ---

pub async fn search_students(api: ApiClient, query: String) -> Result<Vec<Student>, ApiError> {
    api.get_query("students", &[("q", query)]).await
}

pub async fn list_enrollments(api: ApiClient, section_id: i32) -> Result<Vec<Enrollment>, ApiError> {
    api.get_query("enrollments", &[("sectionId", section_id.to_string())])
        .await
}

pub async fn create_enrollment(
    api: ApiClient,
    payload: EnrollmentPayload,
) -> Result<Enrollment, ApiError> {
    api.post("enrollments", &payload).await
}

// --- attendance ---

pub async fn list_attendance_statuses(api: ApiClient) -> Result<Vec<AttendanceStatus>, ApiError> {
    api.get("attendance/statuses").await
}

pub async fn list_attendance(
    api: ApiClient,
    section_id: i32,
    date: NaiveDate,
) -> Result<Vec<AttendanceRecord>, ApiError> {
    api.get_query(
        "attendance",
        &[
            ("sectionId", section_id.to_string()),
            ("date", date.to_string()),
        ],
    )
    .await
}

pub async fn save_attendance(
    api: ApiClient,
    records: Vec<AttendanceRecord>,
) -> Result<Vec<AttendanceRecord>, ApiError> {
    api.post("attendance/bulk", &json!({ "records": records })).await
}

// --- cotejos ---

pub async fn list_cotejos(
    api: ApiClient,
    section_id: i32,
    course_id: i32,
    bimester_id: i32,
) -> Result<Vec<CotejoResponse>, ApiError> {
    api.get_query(
        "cotejos",
        &[
            ("sectionId", section_id.to_string()),
            ("courseId", course_id.to_string()),
            ("bimesterId", bimester_id.to_string()),
        ],
    )
    .await
}

pub async fn save_cotejo_score(
    api: ApiClient,
    cotejo_id: i32,
    score: f64,
) -> Result<CotejoResponse, ApiError> {
    api.put(&format!("cotejos/{cotejo_id}"), &json!({ "score": score }))
        .await
}

pub async fn change_cotejo_status(
    api: ApiClient,
    cotejo_id: i32,
    status: CotejoStatus,
) -> Result<CotejoResponse, ApiError> {
    api.put(&format!("cotejos/{cotejo_id}/status"), &json!({ "status": status }))
        .await
}

// --- users / roles admin ---

pub async fn list_users(api: ApiClient, page: u32, role: Option<String>) -> Result<Page<UserAccount>, ApiError> {
    let mut query = vec![("page", page.to_string()), ("limit", "10".to_string())];
    if let Some(role) = role {
        query.push(("role", role));
    }
    api.get_page("users", &query).await
}

pub async fn list_roles(api: ApiClient) -> Result<Vec<Role>, ApiError> {
    api.get("roles").await
}

pub async fn list_role_permissions(api: ApiClient, role_id: i32) -> Result<Vec<Permission>, ApiError> {
    api.get(&format!("roles/{role_id}/permissions")).await
}

pub async fn change_user_role(
    api: ApiClient,
    user_id: i32,
    role_id: i32,
) -> Result<UserAccount, ApiError> {
    api.put(&format!("users/{user_id}/role"), &json!({ "roleId": role_id }))
        .await
}

pub async fn set_user_active(
    api: ApiClient,
    user_id: i32,
    active: bool,
) -> Result<UserAccount, ApiError> {
    api.put(&format!("users/{user_id}/active"), &json!({ "isActive": active }))
        .await
}
