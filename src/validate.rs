//! Client-side form validation. Runs before any network call; a failed
//! validation produces field-scoped messages and no request.

use std::collections::BTreeMap;
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use crate::api::types::{
    BimesterPayload, CyclePayload, EnrollmentPayload, SchedulePayload, SectionPayload,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

pub fn is_valid_email(email: &str) -> bool {
    // Same shape the registration flow always enforced.
    let re = Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$");
    match re {
        Ok(re) => re.is_match(email.trim()),
        Err(_) => false,
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleForm {
    pub section_id: Option<i32>,
    pub course_id: Option<i32>,
    pub teacher_id: Option<i32>,
    pub day_of_week: Option<u8>,
    pub start_time: String,
    pub end_time: String,
    pub classroom: String,
}

impl ScheduleForm {
    pub fn validate(&self) -> Result<SchedulePayload, FieldErrors> {
        let mut errors = FieldErrors::default();

        let section_id = match self.section_id {
            Some(id) => id,
            None => {
                errors.push("section", "Selecciona una sección");
                0
            }
        };
        let course_id = match self.course_id {
            Some(id) => id,
            None => {
                errors.push("course", "Selecciona un curso");
                0
            }
        };
        let day_of_week = match self.day_of_week {
            Some(day) if (1..=7).contains(&day) => day,
            Some(_) => {
                errors.push("day_of_week", "Día inválido");
                0
            }
            None => {
                errors.push("day_of_week", "Selecciona un día");
                0
            }
        };

        let start = parse_hhmm(&self.start_time);
        if start.is_none() {
            errors.push("start_time", "Hora inválida (HH:MM)");
        }
        let end = parse_hhmm(&self.end_time);
        if end.is_none() {
            errors.push("end_time", "Hora inválida (HH:MM)");
        }
        if let (Some(start), Some(end)) = (start, end) {
            if end <= start {
                errors.push("end_time", "La hora de fin debe ser mayor a la de inicio");
            }
        }

        if self.classroom.trim().is_empty() {
            errors.push("classroom", "Indica el aula");
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(SchedulePayload {
            section_id,
            course_id,
            teacher_id: self.teacher_id,
            day_of_week,
            start_time: self.start_time.trim().to_string(),
            end_time: self.end_time.trim().to_string(),
            classroom: self.classroom.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct CycleForm {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CycleForm {
    pub fn validate(&self) -> Result<CyclePayload, FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.name.trim().is_empty() {
            errors.push("name", "Indica el nombre del ciclo");
        }
        if self.end_date <= self.start_date {
            errors.push("end_date", "La fecha de fin debe ser mayor a la de inicio");
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CyclePayload {
            name: self.name.trim().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

#[derive(Debug, Clone)]
pub struct BimesterForm {
    pub number: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub weeks_text: String,
}

impl BimesterForm {
    pub fn validate(&self) -> Result<BimesterPayload, FieldErrors> {
        let mut errors = FieldErrors::default();
        if !(1..=4).contains(&self.number) {
            errors.push("number", "El bimestre debe estar entre 1 y 4");
        }
        if self.end_date <= self.start_date {
            errors.push("end_date", "La fecha de fin debe ser mayor a la de inicio");
        }
        let weeks_count = match self.weeks_text.trim().parse::<i32>() {
            Ok(weeks) if weeks >= 1 => weeks,
            _ => {
                errors.push("weeks_count", "Semanas inválidas");
                0
            }
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(BimesterPayload {
            number: self.number,
            start_date: self.start_date,
            end_date: self.end_date,
            weeks_count,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SectionForm {
    pub name: String,
    pub capacity_text: String,
    pub grade_id: Option<i32>,
    pub teacher_id: Option<i32>,
}

impl SectionForm {
    pub fn validate(&self) -> Result<SectionPayload, FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.name.trim().is_empty() {
            errors.push("name", "Indica el nombre de la sección");
        }
        let capacity = match self.capacity_text.trim().parse::<i32>() {
            Ok(capacity) if capacity >= 1 => capacity,
            _ => {
                errors.push("capacity", "Capacidad inválida");
                0
            }
        };
        let grade_id = match self.grade_id {
            Some(id) => id,
            None => {
                errors.push("grade", "Selecciona un grado");
                0
            }
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(SectionPayload {
            name: self.name.trim().to_string(),
            capacity,
            grade_id,
            teacher_id: self.teacher_id,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct EnrollmentForm {
    pub student_id: Option<i32>,
    pub section_id: Option<i32>,
    pub cycle_id: Option<i32>,
}

impl EnrollmentForm {
    pub fn validate(&self) -> Result<EnrollmentPayload, FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.student_id.is_none() {
            errors.push("student", "Selecciona un estudiante");
        }
        if self.section_id.is_none() {
            errors.push("section", "Selecciona una sección");
        }
        if self.cycle_id.is_none() {
            errors.push("cycle", "Selecciona un ciclo");
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(EnrollmentPayload {
            student_id: self.student_id.unwrap_or_default(),
            section_id: self.section_id.unwrap_or_default(),
            cycle_id: self.cycle_id.unwrap_or_default(),
        })
    }
}

/// Cotejo scores are 0–100 with up to two decimals.
pub fn parse_score(value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(score) if (0.0..=100.0).contains(&score) => Ok(score),
        Ok(_) => Err("La nota debe estar entre 0 y 100".to_string()),
        Err(_) => Err("Nota inválida".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule_form() -> ScheduleForm {
        ScheduleForm {
            section_id: Some(1),
            course_id: Some(2),
            teacher_id: Some(3),
            day_of_week: Some(1),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            classroom: "A-101".to_string(),
        }
    }

    #[test]
    fn schedule_end_before_start_is_rejected_on_end_time() {
        let form = ScheduleForm {
            start_time: "09:00".to_string(),
            end_time: "08:00".to_string(),
            ..schedule_form()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("end_time").is_some());
        assert!(errors.get("start_time").is_none());
    }

    #[test]
    fn schedule_equal_times_are_rejected() {
        let form = ScheduleForm {
            end_time: "09:00".to_string(),
            ..schedule_form()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn valid_schedule_produces_trimmed_payload() {
        let form = ScheduleForm {
            classroom: "  A-101 ".to_string(),
            ..schedule_form()
        };
        let payload = form.validate().unwrap();
        assert_eq!(payload.classroom, "A-101");
        assert_eq!(payload.day_of_week, 1);
        assert_eq!(payload.teacher_id, Some(3));
    }

    #[test]
    fn schedule_without_selections_reports_each_field() {
        let form = ScheduleForm::default();
        let errors = form.validate().unwrap_err();
        assert!(errors.get("section").is_some());
        assert!(errors.get("course").is_some());
        assert!(errors.get("day_of_week").is_some());
        assert!(errors.get("classroom").is_some());
    }

    #[test]
    fn malformed_time_is_a_field_error() {
        let form = ScheduleForm {
            start_time: "9 en punto".to_string(),
            ..schedule_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("start_time"), Some("Hora inválida (HH:MM)"));
    }

    #[test]
    fn cycle_dates_must_be_ordered() {
        let form = CycleForm {
            name: "Ciclo 2025".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 10, 31).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 13).unwrap(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("end_date").is_some());
    }

    #[test]
    fn bimester_number_is_bounded() {
        let form = BimesterForm {
            number: 5,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 13).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            weeks_text: "9".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("number").is_some());
    }

    #[test]
    fn section_capacity_must_be_positive() {
        let form = SectionForm {
            name: "A".to_string(),
            capacity_text: "0".to_string(),
            grade_id: Some(7),
            teacher_id: None,
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("capacity").is_some());
    }

    #[test]
    fn score_range_is_enforced() {
        assert!(parse_score("85.5").is_ok());
        assert!(parse_score("101").is_err());
        assert!(parse_score("-1").is_err());
        assert!(parse_score("ochenta").is_err());
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("admin@colegio.edu.gt"));
        assert!(!is_valid_email("admin@colegio"));
        assert!(!is_valid_email("sin-arroba"));
    }
}
