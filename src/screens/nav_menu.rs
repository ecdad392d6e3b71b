use iced::widget::{button, column, text, vertical_space, Container};
use iced::Length;
use iced_font_awesome::fa_icon_solid;

use crate::app::{App, Message};
use crate::screens::icon_button_content;

const ADMIN_ENTRIES: &[(&str, &str, Message)] = &[
    ("address-card", "Perfil", Message::GoToProfile),
    ("calendar-days", "Ciclos", Message::GoToCycles),
    ("clock", "Horarios", Message::GoToSchedules),
    ("user-plus", "Inscripciones", Message::GoToEnrollment),
    ("clipboard-check", "Asistencia", Message::GoToAttendance),
    ("list-check", "Cotejos", Message::GoToCotejos),
    ("users", "Usuarios", Message::GoToUsers),
];

// Teaching staff get the day-to-day screens only; the backend still enforces
// permissions on every request.
const STAFF_ENTRIES: &[(&str, &str, Message)] = &[
    ("address-card", "Perfil", Message::GoToProfile),
    ("clipboard-check", "Asistencia", Message::GoToAttendance),
    ("list-check", "Cotejos", Message::GoToCotejos),
];

pub fn nav_menu(app: &App) -> Container<Message> {
    let is_admin = app
        .current_user
        .as_ref()
        .map(|user| user.role == "admin")
        .unwrap_or(false);
    let entries = if is_admin { ADMIN_ENTRIES } else { STAFF_ENTRIES };

    let mut content = column![].spacing(10);
    for (icon, label, message) in entries {
        content = content.push(
            button(icon_button_content(
                fa_icon_solid(icon).style(move |_| text::base(&app.theme)),
                label,
            ))
            .on_press(message.clone())
            .width(Length::Fill),
        );
    }

    content = content
        .push(vertical_space())
        .push(
            button(icon_button_content(
                fa_icon_solid("gear").style(move |_| text::base(&app.theme)),
                "Configuración",
            ))
            .on_press(Message::GoToSettings)
            .width(Length::Fill),
        )
        .push(
            button(icon_button_content(
                fa_icon_solid("arrow-right-from-bracket").style(move |_| text::base(&app.theme)),
                "Salir",
            ))
            .on_press(Message::Logout)
            .width(Length::Fill),
        );

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(10)
}
