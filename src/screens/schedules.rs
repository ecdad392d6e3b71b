use iced::{widget::{Button, Column, Container, PickList, Row, Text, TextInput, Scrollable}, Alignment, Length};
use iced::widget::{button, horizontal_space, text};
use iced::widget::container::bordered_box;
use iced_font_awesome::fa_icon_solid;

use crate::api::types::Schedule;
use crate::app::state::DayOfWeek;
use crate::app::{App, Message};
use crate::screens::{cascade_selectors, field_error, icon_button_content, remote_status};

fn schedule_row<'a>(app: &'a App, schedule: &Schedule) -> Container<'a, Message> {
    let day = DayOfWeek::from_number(schedule.day_of_week)
        .map(|d| d.name)
        .unwrap_or("?");
    let teacher = schedule
        .teacher_id
        .and_then(|id| app.cascade.teachers.items().iter().find(|t| t.id == id))
        .map(|t| t.name.clone())
        .unwrap_or_else(|| "Sin docente".to_string());

    let content = Row::new()
        .padding(10)
        .spacing(10)
        .align_y(Alignment::Center)
        .push(Text::new(day).size(18).width(Length::Fixed(100.0)))
        .push(Text::new(format!("{} - {}", schedule.start_time, schedule.end_time)).size(18))
        .push(Text::new(format!("Aula: {}", schedule.classroom)).size(16))
        .push(Text::new(teacher).size(16))
        .push(horizontal_space())
        .push(button("X").on_press(Message::DeleteSchedule(schedule.id)));

    Container::new(content)
        .style(move |_| bordered_box(&app.theme))
        .width(Length::Fill)
}

pub fn schedules_screen(app: &App) -> Container<Message> {
    let form = Column::new()
        .spacing(10)
        .push(Text::new("Nuevo horario").size(22))
        .push(
            Row::new()
                .spacing(10)
                .align_y(Alignment::Center)
                .push(
                    PickList::new(
                        DayOfWeek::ALL.to_vec(),
                        app.schedule_day,
                        Message::ScheduleDayPicked,
                    )
                    .placeholder("Día"),
                )
                .push(
                    TextInput::new("Inicio (HH:MM)", &app.schedule_start)
                        .on_input(Message::ScheduleStartChanged)
                        .width(Length::Fixed(130.0)),
                )
                .push(
                    TextInput::new("Fin (HH:MM)", &app.schedule_end)
                        .on_input(Message::ScheduleEndChanged)
                        .width(Length::Fixed(130.0)),
                )
                .push(
                    TextInput::new("Aula", &app.schedule_classroom)
                        .on_input(Message::ScheduleClassroomChanged)
                        .width(Length::Fixed(130.0)),
                )
                .push(if app.saving_schedule {
                    Button::new(Text::new("Guardando..."))
                } else {
                    Button::new(icon_button_content(
                        fa_icon_solid("plus").style(move |_| text::base(&app.theme)),
                        "Agregar",
                    ))
                    .on_press(Message::SubmitSchedule)
                }),
        )
        .push(field_error(&app.schedule_errors, "section"))
        .push(field_error(&app.schedule_errors, "course"))
        .push(field_error(&app.schedule_errors, "day_of_week"))
        .push(field_error(&app.schedule_errors, "start_time"))
        .push(field_error(&app.schedule_errors, "end_time"))
        .push(field_error(&app.schedule_errors, "classroom"));

    let section_form = Row::new()
        .spacing(10)
        .align_y(Alignment::Center)
        .push(Text::new("Nueva sección:").size(16))
        .push(
            TextInput::new("Nombre", &app.section_name)
                .on_input(Message::SectionNameChanged)
                .width(Length::Fixed(120.0)),
        )
        .push(
            TextInput::new("Capacidad", &app.section_capacity)
                .on_input(Message::SectionCapacityChanged)
                .width(Length::Fixed(100.0)),
        )
        .push(if app.creating_section {
            Button::new(Text::new("Creando..."))
        } else {
            Button::new(Text::new("Crear")).on_press(Message::SubmitSection)
        })
        .push(field_error(&app.section_errors, "name"))
        .push(field_error(&app.section_errors, "capacity"))
        .push(field_error(&app.section_errors, "grade"));

    let mut schedule_column = Column::new()
        .spacing(15)
        .padding(20)
        .push(Text::new("Horarios").size(30))
        .push(cascade_selectors(app, 5))
        .push(section_form)
        .push(
            Container::new(form)
                .padding(10)
                .style(move |_| bordered_box(&app.theme))
                .width(Length::Fill),
        )
        .push(remote_status(&app.schedules, "Cargando horarios..."));

    if app.cascade.section().is_none() {
        schedule_column = schedule_column
            .push(Text::new("Elige ciclo, grado y sección para ver los horarios").size(16));
    } else {
        for schedule in app.schedules.items() {
            schedule_column = schedule_column.push(schedule_row(app, schedule));
        }
    }

    Container::new(
        Scrollable::new(schedule_column)
            .width(Length::Fill)
            .height(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill)
}
