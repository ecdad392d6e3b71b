use iced::{widget::{column, text, button, Container}, ContentFit, Length};
use iced::widget::{image, row};
use iced::widget::container::bordered_box;
use iced::widget::image::Handle;
use crate::app::{App, Message};

pub fn profile_screen(app: &App) -> Container<Message> {
    let avatar_widget = if let Some(ref data) = app.avatar_data {
        let image_handle = Handle::from_bytes(data.clone());

        image(image_handle)
            .width(Length::Fixed(220.0))
            .height(Length::Fixed(220.0))
            .content_fit(ContentFit::Fill)
    } else {
        image("default_avatar.jpg")
            .width(Length::Fixed(120.0))
            .height(Length::Fixed(120.0))
            .content_fit(ContentFit::Cover)
    };

    let (name, email, role) = match &app.current_user {
        Some(user) => (user.name.as_str(), user.email.as_str(), user.role.as_str()),
        None => ("", "", ""),
    };

    let content = column![
        row![
            avatar_widget,
            column![
                text(format!("Nombre: {name}")).size(24),
                text(format!("Correo: {email}")).size(24),
                text(format!("Rol: {role}")).size(24),
            ]
            .spacing(10),
        ]
        .width(Length::Fill)
        .spacing(20),
        button("Cambiar foto de perfil").on_press(Message::ChooseAvatar),
    ]
        .spacing(20);

    let user_info_widget = Container::new(content)
        .style(move |_| bordered_box(&app.theme))
        .width(Length::Fill)
        .padding(10);
    Container::new(user_info_widget)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(20)
}
