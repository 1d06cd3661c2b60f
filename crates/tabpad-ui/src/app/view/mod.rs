pub mod dialogs;
pub mod editor;
pub mod menus;
pub mod status;

use iced::widget::{column, container, mouse_area, Space, Stack};
use iced::{Background, Element, Length};

use crate::app::{App, Message};
use crate::theme::colors;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let content = column![
            self.view_toolbar(),
            self.view_tabs(),
            self.view_editor_area(),
            self.view_status_bar(),
        ];

        let main_view: Element<'_, Message> = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BG_DARK)),
                ..Default::default()
            })
            .into();

        // The main view stays the first layer so the editor keeps its
        // widget state while overlays come and go.
        let mut layers = vec![main_view];

        if self.about_visible {
            layers.push(backdrop(Message::HideAbout, true));
            layers.push(self.view_about_modal());
        } else if self.active_menu.is_some() {
            layers.push(backdrop(Message::CloseTopMenu, false));
            layers.push(self.view_menu_dropdown());
        }

        Stack::with_children(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

/// Full-window click catcher behind an overlay.
fn backdrop<'a>(on_press: Message, dimmed: bool) -> Element<'a, Message> {
    mouse_area(
        container(Space::new(Length::Fill, Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_| container::Style {
                background: dimmed.then_some(Background::Color(colors::OVERLAY)),
                ..Default::default()
            }),
    )
    .on_press(on_press)
    .into()
}
