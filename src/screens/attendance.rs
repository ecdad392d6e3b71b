use iced::{widget::{Button, Column, Container, PickList, Row, Text, Scrollable}, Alignment, Length};
use iced::widget::{horizontal_space, text};
use iced::widget::container::bordered_box;
use iced_aw::date_picker;
use iced_font_awesome::fa_icon_solid;

use crate::app::state::DatePickerOpen;
use crate::app::{App, Message};
use crate::screens::{cascade_selectors, icon_button_content, remote_status};

pub fn attendance_screen(app: &App) -> Container<Message> {
    let date_button = Button::new(icon_button_content(
        fa_icon_solid("calendar").style(move |_| text::base(&app.theme)),
        "Fecha",
    ))
    .on_press(Message::ChooseAttendanceDate);

    let header = Row::new()
        .spacing(10)
        .align_y(Alignment::Center)
        .push(date_picker(
            matches!(app.date_picker_open, DatePickerOpen::Attendance),
            app.attendance_date,
            date_button,
            Message::CancelDatePicker,
            Message::SubmitAttendanceDate,
        ))
        .push(Text::new(format!(
            "{:04}-{:02}-{:02}",
            app.attendance_date.year, app.attendance_date.month, app.attendance_date.day
        )))
        .push(horizontal_space())
        .push(if app.saving_attendance {
            Button::new(Text::new("Guardando..."))
        } else {
            Button::new(icon_button_content(
                fa_icon_solid("floppy-disk").style(move |_| text::base(&app.theme)),
                "Guardar asistencia",
            ))
            .on_press(Message::SaveAttendance)
        })
        .push(
            Button::new(icon_button_content(
                fa_icon_solid("file-excel").style(move |_| text::base(&app.theme)),
                "Exportar",
            ))
            .on_press(Message::ExportAttendance),
        );

    let mut list_col = Column::new()
        .spacing(5)
        .push(remote_status(&app.enrollments, "Cargando estudiantes..."))
        .push(remote_status(&app.attendance_records, "Cargando asistencia..."));

    if app.cascade.section().is_none() {
        list_col = list_col
            .push(Text::new("Elige ciclo, grado y sección para pasar asistencia").size(16));
    } else {
        for enrollment in app.enrollments.items() {
            let name = enrollment
                .student_name
                .clone()
                .unwrap_or_else(|| format!("Estudiante {}", enrollment.student_id));
            let student_id = enrollment.student_id;
            let selected_status = app
                .attendance_marks
                .get(&student_id)
                .and_then(|id| app.attendance_statuses.items().iter().find(|s| s.id == *id))
                .cloned();

            let row = Row::new()
                .padding(10)
                .spacing(10)
                .align_y(Alignment::Center)
                .push(Text::new(name).size(18))
                .push(horizontal_space())
                .push(
                    PickList::new(
                        app.attendance_statuses.items().to_vec(),
                        selected_status,
                        move |status| Message::MarkAttendance(student_id, status.id),
                    )
                    .placeholder("Estado"),
                );
            list_col = list_col.push(
                Container::new(row)
                    .style(move |_| bordered_box(&app.theme))
                    .width(Length::Fill),
            );
        }
    }

    let content = Column::new()
        .spacing(15)
        .padding(20)
        .push(Text::new("Asistencia").size(30))
        .push(cascade_selectors(app, 3))
        .push(header)
        .push(list_col);

    Container::new(
        Scrollable::new(content)
            .width(Length::Fill)
            .height(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill)
}
