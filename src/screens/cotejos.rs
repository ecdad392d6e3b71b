use iced::{widget::{Button, Column, Container, PickList, Row, Text, TextInput, Scrollable}, Alignment, Color, Length};
use iced::widget::{button, horizontal_space, text};
use iced::widget::container::bordered_box;
use iced_font_awesome::fa_icon_solid;

use crate::api::types::{CotejoResponse, CotejoStatus};
use crate::app::{App, Message};
use crate::screens::{cascade_selectors, icon_button_content, remote_status};

fn cotejo_row<'a>(app: &'a App, cotejo: &CotejoResponse) -> Container<'a, Message> {
    let cotejo_id = cotejo.id;
    let score_text = app
        .cotejo_score_inputs
        .get(&cotejo_id)
        .cloned()
        .unwrap_or_default();
    let locked = cotejo.status == CotejoStatus::Submitted;

    let mut row = Row::new()
        .padding(10)
        .spacing(10)
        .align_y(Alignment::Center)
        .push(Text::new(cotejo.student_name.clone()).size(18).width(Length::Fixed(300.0)));

    if locked {
        let score = cotejo
            .score
            .map(|s| format!("{s:.2}"))
            .unwrap_or_else(|| "Sin nota".to_string());
        row = row.push(Text::new(score).size(18));
    } else {
        row = row
            .push(
                TextInput::new("Nota", &score_text)
                    .on_input(move |value| Message::CotejoScoreChanged(cotejo_id, value))
                    .width(Length::Fixed(90.0)),
            )
            .push(if app.saving_cotejo {
                button(Text::new("..."))
            } else {
                button(Text::new("Guardar")).on_press(Message::SaveCotejoScore(cotejo_id))
            });
    }

    if let Some(error) = app.cotejo_row_errors.get(&cotejo_id) {
        row = row.push(Text::new(error.clone()).size(14).color(Color::from_rgb(1.0, 0.0, 0.0)));
    }

    row = row
        .push(horizontal_space())
        .push(Text::new(cotejo.status.to_string()).size(16))
        .push(
            PickList::new(CotejoStatus::ALL.to_vec(), Some(cotejo.status), move |status| {
                Message::ChangeCotejoStatus(cotejo_id, status)
            })
            .placeholder("Estado"),
        );

    Container::new(row)
        .style(move |_| bordered_box(&app.theme))
        .width(Length::Fill)
}

pub fn cotejos_screen(app: &App) -> Container<Message> {
    let bimester_picker = PickList::new(
        app.bimesters.items().to_vec(),
        app.selected_bimester_ref().cloned(),
        Message::BimesterPicked,
    )
    .placeholder("Bimestre");

    let selectors = Row::new()
        .spacing(10)
        .align_y(Alignment::Center)
        .push(cascade_selectors(app, 4))
        .push(bimester_picker)
        .push(horizontal_space())
        .push(
            Button::new(icon_button_content(
                fa_icon_solid("file-excel").style(move |_| text::base(&app.theme)),
                "Exportar",
            ))
            .on_press(Message::ExportCotejos),
        );

    let mut list_col = Column::new()
        .spacing(5)
        .push(remote_status(&app.cotejos, "Cargando cotejos..."));

    let ready = app.cascade.section().is_some()
        && app.cascade.course().is_some()
        && app.selected_bimester.is_some();
    if !ready {
        list_col = list_col
            .push(Text::new("Elige sección, curso y bimestre para ver el cotejo").size(16));
    } else {
        for cotejo in app.cotejos.items() {
            list_col = list_col.push(cotejo_row(app, cotejo));
        }
    }

    let content = Column::new()
        .spacing(15)
        .padding(20)
        .push(Text::new("Cotejos").size(30))
        .push(selectors)
        .push(list_col);

    Container::new(
        Scrollable::new(content)
            .width(Length::Fill)
            .height(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill)
}
