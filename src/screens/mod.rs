use iced::widget::{text, Column, Container, PickList, Row, Text};
use iced::{Alignment, Color, Element, Length, Renderer, Theme};
use iced_font_awesome::fa_icon_solid;

use crate::app::{App, Message};
use crate::remote::Remote;
use crate::validate::FieldErrors;

pub mod attendance;
pub mod cotejos;
pub mod cycles;
pub mod enrollment;
pub mod login;
pub mod nav_menu;
pub mod profile;
pub mod settings;
pub mod schedules;
pub mod users;

pub use attendance::attendance_screen;
pub use cotejos::cotejos_screen;
pub use cycles::cycles_screen;
pub use enrollment::enrollment_screen;
pub use login::login_screen;
pub use nav_menu::nav_menu;
pub use profile::profile_screen;
pub use settings::settings_screen;
pub use schedules::schedules_screen;
pub use users::users_screen;

pub fn icon_button_content<'a>(
    icon_element: impl Into<Element<'a, Message, Theme, Renderer>>,
    label: &'a str,
) -> Row<'a, Message> {
    Row::new()
        .align_y(Alignment::Center)
        .spacing(5)
        .push(icon_element)
        .push(text(label))
}

/// Inline message under a form field, nothing when the field is clean.
pub fn field_error<'a>(errors: &'a FieldErrors, field: &str) -> Column<'a, Message> {
    let mut col = Column::new();
    if let Some(message) = errors.get(field) {
        col = col.push(Text::new(message).size(14).color(Color::from_rgb(1.0, 0.0, 0.0)));
    }
    col
}

/// Status line for a `Remote` list: progress text while loading, the inline
/// error afterwards, nothing once the data is there.
pub fn remote_status<'a, T>(remote: &'a Remote<T>, loading_label: &'a str) -> Column<'a, Message> {
    let mut col = Column::new();
    if remote.is_loading() {
        col = col.push(Text::new(loading_label).size(16));
    } else if let Some(error) = remote.error() {
        col = col.push(Text::new(error).size(16).color(Color::from_rgb(1.0, 0.0, 0.0)));
    }
    col
}

/// The dependent selector row. `stages` is how deep the screen goes:
/// 3 = ciclo/grado/sección, 4 adds curso, 5 adds docente. A picker whose
/// parent has no selection shows its placeholder over an empty list.
pub fn cascade_selectors(app: &App, stages: usize) -> Row<Message> {
    let cascade = &app.cascade;
    let mut row = Row::new().spacing(10).align_y(Alignment::Center);

    // Archived cycles stay out of the working pickers.
    let open_cycles: Vec<_> = cascade
        .cycles
        .items()
        .iter()
        .filter(|c| !c.is_closed)
        .cloned()
        .collect();
    row = row.push(
        PickList::new(
            open_cycles,
            cascade.selected_cycle().cloned(),
            Message::CyclePicked,
        )
        .placeholder("Ciclo"),
    );
    row = row.push(
        PickList::new(
            cascade.grades.items().to_vec(),
            cascade.selected_grade().cloned(),
            Message::GradePicked,
        )
        .placeholder("Grado"),
    );
    row = row.push(
        PickList::new(
            cascade.sections.items().to_vec(),
            cascade.selected_section().cloned(),
            Message::SectionPicked,
        )
        .placeholder("Sección"),
    );
    if stages >= 4 {
        row = row.push(
            PickList::new(
                cascade.courses.items().to_vec(),
                cascade.selected_course().cloned(),
                Message::CoursePicked,
            )
            .placeholder("Curso"),
        );
    }
    if stages >= 5 {
        row = row.push(
            PickList::new(
                cascade.teachers.items().to_vec(),
                cascade.selected_teacher().cloned(),
                Message::TeacherPicked,
            )
            .placeholder("Docente"),
        );
    }
    row
}

/// Shown in place of a screen whose data load came back 403.
pub fn no_permission_screen<'a>() -> Container<'a, Message> {
    let content = Column::new()
        .spacing(15)
        .align_x(Alignment::Center)
        .push(fa_icon_solid("lock").size(48.0))
        .push(Text::new("No tienes permiso para ver esta sección").size(24))
        .push(Text::new("Contacta al administrador si crees que es un error").size(16));

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .padding(40)
}
