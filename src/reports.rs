//! XLSX report generation. Files land in `reports/` next to the executable
//! and are opened with the system handler after writing.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use umya_spreadsheet::{new_file, writer};

use crate::api::types::{AttendanceRecord, AttendanceStatus, CotejoResponse, Enrollment};

pub type ReportResult = Result<PathBuf, String>;

fn reports_dir() -> Result<PathBuf, String> {
    let exe_dir = std::env::current_exe()
        .map_err(|e| e.to_string())?
        .parent()
        .ok_or("No se pudo resolver la carpeta del ejecutable")?
        .to_path_buf();
    let dir = exe_dir.join("reports");
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| e.to_string())?;
    }
    Ok(dir)
}

fn col_to_letter(col: usize) -> String {
    // 1-based, enough for A-Z; no report here is wider than that.
    debug_assert!((1..=26).contains(&col));
    ((b'A' + (col as u8) - 1) as char).to_string()
}

/// Attendance summary for one section and date: one row per student with the
/// status name resolved from the backend catalog.
pub fn attendance_report(
    section_name: &str,
    date: NaiveDate,
    enrollments: &[Enrollment],
    records: &[AttendanceRecord],
    statuses: &[AttendanceStatus],
) -> ReportResult {
    let dir = reports_dir()?;
    let path = dir.join(format!("asistencia_{}_{}.xlsx", section_name.replace(' ', "-"), date));

    let status_names: HashMap<i32, &str> = statuses
        .iter()
        .map(|s| (s.id, s.name.as_str()))
        .collect();
    let by_student: HashMap<i32, i32> = records
        .iter()
        .map(|r| (r.student_id, r.status_id))
        .collect();

    let mut book = new_file();
    let sheet = book
        .get_sheet_by_name_mut("Sheet1")
        .ok_or("Hoja inicial no encontrada")?;

    sheet.get_cell_mut("A1").set_value("Reporte de asistencia");
    sheet
        .get_cell_mut("A2")
        .set_value(format!("Sección: {} — Fecha: {}", section_name, date));

    let headers = ["Estudiante", "Estado"];
    for (i, header) in headers.iter().enumerate() {
        let cell = format!("{}4", col_to_letter(i + 1));
        sheet.get_cell_mut(&*cell).set_value(*header);
    }

    for (i, enrollment) in enrollments.iter().enumerate() {
        let row = i + 5;
        let name = enrollment
            .student_name
            .clone()
            .unwrap_or_else(|| format!("Estudiante {}", enrollment.student_id));
        let status = by_student
            .get(&enrollment.student_id)
            .and_then(|id| status_names.get(id).copied())
            .unwrap_or("Sin registro");
        let values = [name, status.to_string()];
        for (j, value) in values.iter().enumerate() {
            let cell = format!("{}{}", col_to_letter(j + 1), row);
            sheet.get_cell_mut(&*cell).set_value(value);
        }
    }

    writer::xlsx::write(&book, &path).map_err(|e| e.to_string())?;
    Ok(path)
}

/// Consolidated cotejo sheet for one section/course/bimester.
pub fn cotejo_report(
    section_name: &str,
    course_name: &str,
    bimester_number: i32,
    cotejos: &[CotejoResponse],
) -> ReportResult {
    let dir = reports_dir()?;
    let path = dir.join(format!(
        "cotejo_{}_b{}.xlsx",
        section_name.replace(' ', "-"),
        bimester_number
    ));

    let mut book = new_file();
    let sheet = book
        .get_sheet_by_name_mut("Sheet1")
        .ok_or("Hoja inicial no encontrada")?;

    sheet.get_cell_mut("A1").set_value("Cotejo consolidado");
    sheet.get_cell_mut("A2").set_value(format!(
        "Sección: {} — Curso: {} — Bimestre {}",
        section_name, course_name, bimester_number
    ));

    let headers = ["Estudiante", "Nota", "Estado"];
    for (i, header) in headers.iter().enumerate() {
        let cell = format!("{}4", col_to_letter(i + 1));
        sheet.get_cell_mut(&*cell).set_value(*header);
    }

    for (i, cotejo) in cotejos.iter().enumerate() {
        let row = i + 5;
        let score = cotejo
            .score
            .map(|s| format!("{s:.2}"))
            .unwrap_or_else(|| "—".to_string());
        let values = [
            cotejo.student_name.clone(),
            score,
            cotejo.status.to_string(),
        ];
        for (j, value) in values.iter().enumerate() {
            let cell = format!("{}{}", col_to_letter(j + 1), row);
            sheet.get_cell_mut(&*cell).set_value(value);
        }
    }

    writer::xlsx::write(&book, &path).map_err(|e| e.to_string())?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters_are_one_based() {
        assert_eq!(col_to_letter(1), "A");
        assert_eq!(col_to_letter(3), "C");
        assert_eq!(col_to_letter(26), "Z");
    }

    #[test]
    #[should_panic]
    fn column_zero_is_out_of_range() {
        col_to_letter(0);
    }
}
