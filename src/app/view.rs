use iced::Length;
use iced::widget::{button, Column, Container, Row, Text};
use iced::widget::container::bordered_box;
use crate::app::state::Screen;
use crate::screens::{attendance_screen, cotejos_screen, cycles_screen, enrollment_screen, login_screen, nav_menu, no_permission_screen, profile_screen, settings_screen, schedules_screen, users_screen};
use super::{App, Message};

impl App {
    pub fn view(&self) -> Row<Message> {
        let screen: Container<Message> = if self.no_permission {
            no_permission_screen()
        } else {
            match &self.current_screen {
                Screen::Login => login_screen(self),
                Screen::Profile => profile_screen(self),
                Screen::Settings => settings_screen(self),
                Screen::Cycles => cycles_screen(self),
                Screen::Users => users_screen(self),
                Screen::Schedules => schedules_screen(self),
                Screen::Enrollment => enrollment_screen(self),
                Screen::Attendance => attendance_screen(self),
                Screen::Cotejos => cotejos_screen(self),
            }
        };

        let mut content = Column::new();
        if let Some(notice) = &self.notice {
            content = content.push(
                Container::new(
                    Row::new()
                        .spacing(10)
                        .push(Text::new(notice.clone()).size(16))
                        .push(button("X").on_press(Message::DismissNotice)),
                )
                .padding(10)
                .width(Length::Fill)
                .style(move |_| bordered_box(&self.theme)),
            );
        }
        content = content.push(screen.width(Length::Fill));

        Row::new()
            .spacing(20)
            .push(
                // Sidebar, hidden while logging in.
                if self.current_screen != Screen::Login {
                    Container::new(nav_menu(self))
                        .width(Length::Fixed(200.0))
                        .height(Length::Fill)
                        .padding(10)
                } else {
                    Container::new(Column::new())
                        .width(Length::Fixed(0.0))
                        .height(Length::Fill)
                },
            )
            .push(content.width(Length::Fill))
            .into()
    }
}
