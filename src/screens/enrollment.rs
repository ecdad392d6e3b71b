use iced::{widget::{Button, Column, Container, Row, Text, TextInput, Scrollable}, Alignment, Length};
use iced::widget::{button, horizontal_space, text};
use iced::widget::container::bordered_box;
use iced_font_awesome::fa_icon_solid;

use crate::app::{App, Message};
use crate::screens::{cascade_selectors, field_error, icon_button_content, remote_status};

pub fn enrollment_screen(app: &App) -> Container<Message> {
    let search = Column::new()
        .spacing(10)
        .push(Text::new("Inscribir estudiante").size(22))
        .push(
            TextInput::new("Buscar estudiante por nombre o código...", &app.student_query)
                .on_input(Message::StudentQueryChanged)
                .padding(10)
                .size(18)
                .width(Length::Fixed(400.0)),
        )
        .push(remote_status(&app.students, "Buscando..."));

    let mut result_col = Column::new().spacing(5);
    for student in app.students.items() {
        let picked = app
            .selected_student
            .as_ref()
            .map(|s| s.id == student.id)
            .unwrap_or(false);
        let label = if picked {
            format!("» {student}")
        } else {
            student.to_string()
        };
        result_col = result_col.push(
            button(Text::new(label))
                .on_press(Message::StudentPicked(student.clone()))
                .width(Length::Fixed(400.0)),
        );
    }

    let submit = if app.enrolling {
        Button::new(Text::new("Inscribiendo..."))
    } else {
        Button::new(icon_button_content(
            fa_icon_solid("user-plus").style(move |_| text::base(&app.theme)),
            "Inscribir",
        ))
        .on_press(Message::SubmitEnrollment)
    };

    let form = Column::new()
        .spacing(10)
        .push(search)
        .push(result_col)
        .push(field_error(&app.enrollment_errors, "student"))
        .push(field_error(&app.enrollment_errors, "section"))
        .push(field_error(&app.enrollment_errors, "cycle"))
        .push(submit);

    let mut enrolled_col = Column::new()
        .spacing(5)
        .push(Text::new("Inscritos en la sección").size(22))
        .push(remote_status(&app.enrollments, "Cargando inscripciones..."));
    if app.cascade.section().is_none() {
        enrolled_col = enrolled_col
            .push(Text::new("Elige ciclo, grado y sección para ver los inscritos").size(16));
    } else {
        for enrollment in app.enrollments.items() {
            let name = enrollment
                .student_name
                .clone()
                .unwrap_or_else(|| format!("Estudiante {}", enrollment.student_id));
            let row = Row::new()
                .padding(10)
                .spacing(10)
                .align_y(Alignment::Center)
                .push(Text::new(name).size(18))
                .push(horizontal_space())
                .push(Text::new(enrollment.status.clone()).size(16));
            enrolled_col = enrolled_col.push(
                Container::new(row)
                    .style(move |_| bordered_box(&app.theme))
                    .width(Length::Fill),
            );
        }
    }

    let content = Column::new()
        .spacing(15)
        .padding(20)
        .push(Text::new("Inscripciones").size(30))
        .push(cascade_selectors(app, 3))
        .push(
            Container::new(form)
                .padding(10)
                .style(move |_| bordered_box(&app.theme))
                .width(Length::Fill),
        )
        .push(enrolled_col);

    Container::new(
        Scrollable::new(content)
            .width(Length::Fill)
            .height(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill)
}
