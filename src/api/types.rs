use std::fmt;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolCycle {
    pub id: i32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub is_closed: bool,
}

impl fmt::Display for SchoolCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq for SchoolCycle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: i32,
    pub name: String,
    pub level: String,
    pub order: i32,
    pub is_active: bool,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq for Grade {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub grade_id: i32,
    pub teacher_id: Option<i32>,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub area: String,
    pub color: Option<String>,
    pub is_active: bool,
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {}", self.code, self.name)
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bimester {
    pub id: i32,
    pub cycle_id: i32,
    pub number: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub weeks_count: i32,
    pub is_active: bool,
}

impl fmt::Display for Bimester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bimestre {}", self.number)
    }
}

impl PartialEq for Bimester {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

// Times stay as "HH:MM" strings on the wire; validate::parse_hhmm owns the parsing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: i32,
    pub section_id: i32,
    pub course_id: i32,
    pub teacher_id: Option<i32>,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub classroom: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePayload {
    pub section_id: i32,
    pub course_id: i32,
    pub teacher_id: Option<i32>,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub classroom: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i32,
    pub code: String,
    pub full_name: String,
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.full_name, self.code)
    }
}

impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i32,
    pub student_id: i32,
    pub section_id: i32,
    pub cycle_id: i32,
    pub status: String,
    pub student_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentPayload {
    pub student_id: i32,
    pub section_id: i32,
    pub cycle_id: i32,
}

// Status catalog is backend-owned; nothing here hardcodes the codes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStatus {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub color: Option<String>,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq for AttendanceStatus {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub student_id: i32,
    pub section_id: i32,
    pub course_id: Option<i32>,
    pub date: NaiveDate,
    pub status_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CotejoStatus {
    Draft,
    Completed,
    Submitted,
}

impl CotejoStatus {
    pub const ALL: &'static [CotejoStatus] = &[
        CotejoStatus::Draft,
        CotejoStatus::Completed,
        CotejoStatus::Submitted,
    ];
}

impl fmt::Display for CotejoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CotejoStatus::Draft => "Borrador",
                CotejoStatus::Completed => "Completado",
                CotejoStatus::Submitted => "Enviado",
            }
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CotejoResponse {
    pub id: i32,
    pub student_id: i32,
    pub student_name: String,
    pub course_id: i32,
    pub bimester_id: i32,
    pub score: Option<f64>,
    pub status: CotejoStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub avatar_url: Option<String>,
}

impl fmt::Display for UserAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq for UserAccount {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: i32,
    pub name: String,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: i32,
    pub code: String,
    pub name: String,
}

// Teachers are accounts with the "teacher" role; picklists show the name only.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherRef {
    pub id: i32,
    pub name: String,
}

impl fmt::Display for TeacherRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq for TeacherRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclePayload {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BimesterPayload {
    pub number: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub weeks_count: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPayload {
    pub name: String,
    pub capacity: i32,
    pub grade_id: i32,
    pub teacher_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // A payload accepted by the create endpoint comes back as the stored
    // record with the same field values; both sides share the camelCase
    // wire names, so serializing one and deserializing the other must agree.
    #[test]
    fn schedule_payload_fields_survive_the_wire_round_trip() {
        let payload = SchedulePayload {
            section_id: 1,
            course_id: 2,
            teacher_id: Some(3),
            day_of_week: 5,
            start_time: "07:30".to_string(),
            end_time: "09:00".to_string(),
            classroom: "B-204".to_string(),
        };

        let mut value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("dayOfWeek").is_some());
        assert!(value.get("startTime").is_some());
        assert!(value.get("endTime").is_some());
        assert!(value.get("classroom").is_some());

        // The backend echoes the record back with its generated id.
        value["id"] = serde_json::json!(10);
        let schedule: Schedule = serde_json::from_value(value).unwrap();
        assert_eq!(schedule.section_id, payload.section_id);
        assert_eq!(schedule.course_id, payload.course_id);
        assert_eq!(schedule.teacher_id, payload.teacher_id);
        assert_eq!(schedule.day_of_week, payload.day_of_week);
        assert_eq!(schedule.start_time, payload.start_time);
        assert_eq!(schedule.end_time, payload.end_time);
        assert_eq!(schedule.classroom, payload.classroom);
    }

    #[test]
    fn cycle_payload_fields_survive_the_wire_round_trip() {
        let payload = CyclePayload {
            name: "Ciclo 2026".to_string(),
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2026, 10, 30).unwrap(),
        };

        let mut value = serde_json::to_value(&payload).unwrap();
        value["id"] = serde_json::json!(4);
        value["isActive"] = serde_json::json!(true);
        value["isClosed"] = serde_json::json!(false);
        let cycle: SchoolCycle = serde_json::from_value(value).unwrap();
        assert_eq!(cycle.name, payload.name);
        assert_eq!(cycle.start_date, payload.start_date);
        assert_eq!(cycle.end_date, payload.end_date);
    }
}
