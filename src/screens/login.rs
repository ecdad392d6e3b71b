use iced::{widget::{column, text, text_input, button, vertical_space, Container}, Length, Center};
use crate::app::{App, Message};

pub fn login_screen(app: &App) -> Container<Message> {
    let submit = if app.logging_in {
        button("Ingresando...").padding(10)
    } else {
        button("Iniciar sesión").on_press(Message::LoginPressed).padding(10)
    };

    let content = column![
        text("Panel administrativo").size(30),
        vertical_space(),
        text_input("Correo electrónico", &app.login_email)
            .on_input(Message::EmailChanged)
            .padding(10)
            .size(18)
            .width(Length::Fixed(350.0)),
        text_input("Contraseña", &app.login_password)
            .on_input(Message::PasswordChanged)
            .secure(true)
            .padding(10)
            .size(18)
            .width(Length::Fixed(350.0)),
        submit,
        text(app.login_error.as_deref().unwrap_or_default()).size(18),
        vertical_space(),
    ]
        .spacing(15)
        .width(Length::Fill)
        .align_x(Center);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(40)
}
