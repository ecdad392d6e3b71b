use iced::{widget::{Button, Column, Container, Row, Stack, Text, TextInput, mouse_area, Scrollable}, Alignment, Color, Length};
use iced::widget::{button, horizontal_space, text};
use iced::widget::container::{background, bordered_box};
use iced_aw::date_picker;
use iced_font_awesome::fa_icon_solid;

use crate::api::types::{Bimester, SchoolCycle};
use crate::app::state::DatePickerOpen;
use crate::app::{App, Message};
use crate::screens::{field_error, icon_button_content, remote_status};

fn headerbar(cycle: &SchoolCycle) -> Row<'static, Message> {
    let state = if cycle.is_closed {
        "Cerrado"
    } else if cycle.is_active {
        "Activo"
    } else {
        "Inactivo"
    };

    let mut actions = Row::new().spacing(10)
        .push(button("Editar").on_press(Message::StartEditingCycle(cycle.clone())))
        .push(button("Bimestres").on_press(Message::ShowBimesters(cycle.id)));
    if !cycle.is_closed {
        actions = actions.push(button("Cerrar ciclo").on_press(Message::CloseCycle(cycle.id)));
    }

    Row::new()
        .push(actions)
        .push(horizontal_space())
        .push(text(cycle.name.clone()).size(26))
        .push(horizontal_space())
        .push(text(state).size(18))
        .align_y(Alignment::Center)
        .width(Length::Fill)
}

fn bimester_row<'a>(app: &'a App, bimester: &Bimester) -> Container<'a, Message> {
    let editing = app
        .editing_bimester
        .as_ref()
        .map(|b| b.id == bimester.id)
        .unwrap_or(false);

    let content: Row<Message> = if editing {
        let start_button = Button::new(Text::new("Inicio")).on_press(Message::ChooseBimesterStart);
        let end_button = Button::new(Text::new("Fin")).on_press(Message::ChooseBimesterEnd);

        Row::new()
            .spacing(10)
            .align_y(Alignment::Center)
            .push(Text::new(format!("Bimestre {}", bimester.number)).size(18))
            .push(date_picker(
                matches!(app.date_picker_open, DatePickerOpen::BimesterStart),
                app.bimester_start,
                start_button,
                Message::CancelDatePicker,
                Message::SubmitBimesterStart,
            ))
            .push(Text::new(format!(
                "{:04}-{:02}-{:02}",
                app.bimester_start.year, app.bimester_start.month, app.bimester_start.day
            )))
            .push(date_picker(
                matches!(app.date_picker_open, DatePickerOpen::BimesterEnd),
                app.bimester_end,
                end_button,
                Message::CancelDatePicker,
                Message::SubmitBimesterEnd,
            ))
            .push(Text::new(format!(
                "{:04}-{:02}-{:02}",
                app.bimester_end.year, app.bimester_end.month, app.bimester_end.day
            )))
            .push(
                TextInput::new("Semanas", &app.bimester_weeks)
                    .on_input(Message::BimesterWeeksChanged)
                    .width(Length::Fixed(90.0)),
            )
            .push(field_error(&app.bimester_errors, "weeks_count"))
            .push(field_error(&app.bimester_errors, "end_date"))
            .push(horizontal_space())
            .push(if app.saving_bimester {
                button("Guardando...")
            } else {
                button("Guardar").on_press(Message::SubmitBimester)
            })
            .push(button("Cancelar").on_press(Message::CancelEditingBimester))
    } else {
        Row::new()
            .spacing(10)
            .align_y(Alignment::Center)
            .push(Text::new(format!("Bimestre {}", bimester.number)).size(18))
            .push(Text::new(format!(
                "{} a {} ({} semanas)",
                bimester.start_date, bimester.end_date, bimester.weeks_count
            )))
            .push(horizontal_space())
            .push(button("Editar").on_press(Message::StartEditingBimester(bimester.clone())))
    };

    Container::new(content)
        .padding(10)
        .width(Length::Fill)
        .style(move |_| bordered_box(&app.theme))
}

pub fn cycles_screen(app: &App) -> Container<Message> {
    let add_button = Button::new(icon_button_content(
        fa_icon_solid("plus").style(move |_| text::base(&app.theme)),
        "Nuevo ciclo",
    ))
    .on_press(Message::ToggleCycleModal(true));

    let mut cycle_column = Column::new()
        .spacing(20)
        .padding(20)
        .push(Row::new().push(add_button))
        .push(remote_status(&app.cycles, "Cargando ciclos..."));

    for cycle in app.cycles.items() {
        let mut card = Column::new().push(
            Container::new(headerbar(cycle))
                .padding(10)
                .style(move |_| bordered_box(&app.theme)),
        );

        if app.bimesters_cycle == Some(cycle.id) {
            let mut bimester_col = Column::new()
                .spacing(5)
                .push(remote_status(&app.bimesters, "Cargando bimestres..."));
            for bimester in app.bimesters.items() {
                bimester_col = bimester_col.push(bimester_row(app, bimester));
            }
            card = card.push(Container::new(bimester_col).padding(10));
        }

        cycle_column = cycle_column.push(
            Container::new(card)
                .padding(10)
                .style(move |_| bordered_box(&app.theme))
                .width(Length::Fill),
        );
    }

    let base_ui = Container::new(
        Scrollable::new(cycle_column)
            .width(Length::Fill)
            .height(Length::Fill),
    )
    .align_y(Alignment::Start)
    .width(Length::Fill)
    .height(Length::Fill);

    let mut ui_stack = Stack::new().push(base_ui);

    if app.show_cycle_modal {
        let title = if app.editing_cycle.is_some() {
            "Editar ciclo"
        } else {
            "Nuevo ciclo"
        };

        let start_button = Button::new(Text::new("Fecha de inicio")).on_press(Message::ChooseCycleStart);
        let end_button = Button::new(Text::new("Fecha de fin")).on_press(Message::ChooseCycleEnd);

        let modal_content = Column::new()
            .spacing(15)
            .align_x(Alignment::Start)
            .push(Text::new(title).size(22))
            .push(
                TextInput::new("Nombre del ciclo", &app.cycle_name)
                    .on_input(Message::CycleNameChanged)
                    .padding(10)
                    .size(18),
            )
            .push(field_error(&app.cycle_errors, "name"))
            .push(
                Row::new()
                    .spacing(5)
                    .align_y(Alignment::Center)
                    .push(date_picker(
                        matches!(app.date_picker_open, DatePickerOpen::CycleStart),
                        app.cycle_start,
                        start_button,
                        Message::CancelDatePicker,
                        Message::SubmitCycleStart,
                    ))
                    .push(Text::new(format!(
                        "{:04}-{:02}-{:02}",
                        app.cycle_start.year, app.cycle_start.month, app.cycle_start.day
                    ))),
            )
            .push(
                Row::new()
                    .spacing(5)
                    .align_y(Alignment::Center)
                    .push(date_picker(
                        matches!(app.date_picker_open, DatePickerOpen::CycleEnd),
                        app.cycle_end,
                        end_button,
                        Message::CancelDatePicker,
                        Message::SubmitCycleEnd,
                    ))
                    .push(Text::new(format!(
                        "{:04}-{:02}-{:02}",
                        app.cycle_end.year, app.cycle_end.month, app.cycle_end.day
                    ))),
            )
            .push(field_error(&app.cycle_errors, "end_date"))
            .push(
                Row::new()
                    .spacing(10)
                    .push(if app.saving_cycle {
                        button(Text::new("Guardando..."))
                    } else {
                        button(Text::new("Guardar")).on_press(Message::SubmitCycle)
                    })
                    .push(button(Text::new("Cancelar")).on_press(Message::ToggleCycleModal(false))),
            );

        let modal_container = Container::new(modal_content)
            .style(move |_| bordered_box(&app.theme))
            .padding(20)
            .width(Length::Fixed(500.0));

        let modal_overlay = Container::new(
            mouse_area(Container::new(modal_container).center(Length::Fill))
                .on_press(Message::ToggleCycleModal(false)),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_y(Length::Fill)
        .center_x(Length::Fill)
        .style(move |_| background(Color { r: 0.0, g: 0.0, b: 0.0, a: 0.7 }));
        ui_stack = ui_stack.push(modal_overlay);
    }

    Container::new(ui_stack)
        .width(Length::Fill)
        .height(Length::Fill)
}
