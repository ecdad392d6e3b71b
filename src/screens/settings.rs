use iced::{widget::{column, text, Container, vertical_space}, Length, Center, Theme};
use iced::widget::{button, pick_list, text_input};
use crate::app::{App, Message};
use crate::config::theme_to_str;

pub fn settings_screen(app: &App) -> Container<Message> {
    let current_name = theme_to_str(&app.theme);
    let theme_names: Vec<&'static str> = Theme::ALL.iter().map(theme_to_str).collect();
    let content = column![
        text("Configuración").size(30),
        vertical_space(),
        pick_list(theme_names, Some(current_name), Message::ThemeSelected)
            .placeholder("Elige un tema"),
        text_input("URL del servidor", &app.api_url_input)
            .on_input(Message::ApiUrlChanged)
            .padding(10)
            .size(18)
            .width(Length::Fixed(400.0)),
        button("Guardar").on_press(Message::SaveSettings).padding(10),
        vertical_space(),
    ]
        .spacing(15)
        .align_x(Center);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(40)
}
