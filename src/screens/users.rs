use iced::{widget::{Button, Column, Container, PickList, Row, Stack, Text, mouse_area, Scrollable}, Alignment, Color, Length};
use iced::widget::{button, horizontal_space, text, Rule};
use iced::widget::container::{background, bordered_box};
use iced_font_awesome::fa_icon_solid;

use crate::api::types::UserAccount;
use crate::app::{App, Message};
use crate::screens::{icon_button_content, remote_status};

const ALL_ROLES: &str = "Todos";

fn user_row<'a>(app: &'a App, user: &UserAccount) -> Container<'a, Message> {
    let state = if user.is_active { "Activa" } else { "Desactivada" };
    let toggle_label = if user.is_active { "Desactivar" } else { "Activar" };

    let content = Row::new()
        .padding(10)
        .spacing(10)
        .align_y(Alignment::Center)
        .push(
            Column::new()
                .spacing(5)
                .push(Text::new(user.name.clone()).size(18))
                .push(Text::new(user.email.clone()).size(14)),
        )
        .push(horizontal_space())
        .push(Text::new(user.role.clone()).size(16))
        .push(Text::new(state).size(16))
        .push(button("Cambiar rol").on_press(Message::StartEditingUser(user.clone())))
        .push(
            button(Text::new(toggle_label))
                .on_press(Message::ToggleUserActive(user.id, !user.is_active)),
        );

    Container::new(content)
        .style(move |_| bordered_box(&app.theme))
        .width(Length::Fill)
}

pub fn users_screen(app: &App) -> Container<Message> {
    let mut role_options = vec![ALL_ROLES.to_string()];
    role_options.extend(app.roles.items().iter().map(|r| r.name.clone()));
    let selected_role = app
        .users_role_filter
        .clone()
        .unwrap_or_else(|| ALL_ROLES.to_string());

    let filter_row = Row::new()
        .spacing(10)
        .align_y(Alignment::Center)
        .push(Text::new("Filtrar por rol:").size(18))
        .push(
            PickList::new(role_options, Some(selected_role), |role| {
                Message::UserRoleFilterChanged(if role == ALL_ROLES { None } else { Some(role) })
            })
            .placeholder(ALL_ROLES),
        );

    let mut permissions_row = Row::new().spacing(10).align_y(Alignment::Center)
        .push(Text::new("Permisos por rol:").size(18));
    for role in app.roles.items() {
        permissions_row = permissions_row.push(
            button(Text::new(role.name.clone()))
                .on_press(Message::ShowRolePermissions(role.clone())),
        );
    }

    let mut user_column = Column::new()
        .spacing(10)
        .padding(20)
        .push(filter_row)
        .push(permissions_row)
        .push(remote_status(&app.users, "Cargando usuarios..."));

    if let Some(page) = app.users.data() {
        for user in &page.items {
            user_column = user_column.push(user_row(app, user));
        }

        let pager = Row::new()
            .spacing(10)
            .align_y(Alignment::Center)
            .push(
                Button::new(icon_button_content(
                    fa_icon_solid("angle-left").style(move |_| text::base(&app.theme)),
                    "Anterior",
                ))
                .on_press(Message::UsersPreviousPage),
            )
            .push(Text::new(format!(
                "Página {} de {} ({} usuarios)",
                page.meta.page, page.meta.total_pages, page.meta.total
            )))
            .push(
                Button::new(icon_button_content(
                    fa_icon_solid("angle-right").style(move |_| text::base(&app.theme)),
                    "Siguiente",
                ))
                .on_press(Message::UsersNextPage),
            );
        user_column = user_column.push(pager);
    }

    let base_ui = Container::new(
        Scrollable::new(user_column)
            .width(Length::Fill)
            .height(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill);

    let mut ui_stack = Stack::new().push(base_ui);

    if let Some(user) = &app.editing_user {
        let modal_content = Column::new()
            .spacing(15)
            .push(Text::new(format!("Cambiar rol de {}", user.name)).size(22))
            .push(
                PickList::new(
                    app.roles.items().to_vec(),
                    app.edit_user_role.clone(),
                    Message::EditUserRoleChanged,
                )
                .placeholder("Elige un rol"),
            )
            .push(
                Row::new()
                    .spacing(10)
                    .push(if app.saving_user {
                        button(Text::new("Guardando..."))
                    } else {
                        button(Text::new("Guardar")).on_press(Message::SubmitUserRole)
                    })
                    .push(button(Text::new("Cancelar")).on_press(Message::CancelEditingUser)),
            );

        let modal_container = Container::new(modal_content)
            .style(move |_| bordered_box(&app.theme))
            .padding(20)
            .width(Length::Fixed(400.0));

        let modal_overlay = Container::new(
            mouse_area(Container::new(modal_container).center(Length::Fill))
                .on_press(Message::CancelEditingUser),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_y(Length::Fill)
        .center_x(Length::Fill)
        .style(move |_| background(Color { r: 0.0, g: 0.0, b: 0.0, a: 0.7 }));
        ui_stack = ui_stack.push(modal_overlay);
    }

    if app.show_permissions_modal {
        let title = app
            .permissions_role
            .as_ref()
            .map(|r| format!("Permisos del rol {}", r.name))
            .unwrap_or_else(|| "Permisos".to_string());

        let mut permission_col = Column::new()
            .spacing(5)
            .push(remote_status(&app.role_permissions, "Cargando permisos..."));
        for permission in app.role_permissions.items() {
            permission_col = permission_col.push(
                Row::new()
                    .spacing(10)
                    .push(Text::new(permission.code.clone()).size(14))
                    .push(Text::new(permission.name.clone()).size(14)),
            );
        }

        let modal_content = Column::new()
            .spacing(15)
            .push(Text::new(title).size(22))
            .push(Scrollable::new(permission_col).height(Length::Fixed(300.0)))
            .push(Rule::horizontal(10))
            .push(button(Text::new("Cerrar")).on_press(Message::ClosePermissionsModal));

        let modal_container = Container::new(modal_content)
            .style(move |_| bordered_box(&app.theme))
            .padding(20)
            .width(Length::Fixed(450.0));

        let modal_overlay = Container::new(
            mouse_area(Container::new(modal_container).center(Length::Fill))
                .on_press(Message::ClosePermissionsModal),
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
