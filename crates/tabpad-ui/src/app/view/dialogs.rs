use iced::widget::{button, column, container, text, Space};
use iced::{Background, Border, Color, Element, Length, Padding, Theme};

use crate::app::{App, Message};
use crate::theme::colors;

impl App {
    pub fn view_about_modal(&self) -> Element<'_, Message> {
        let modal_content = column![
            text(format!("About {}", self.config.ui.app_name))
                .size(20)
                .color(colors::ACCENT),
            Space::with_height(8),
            text("A simple multi-tab notepad with line numbers, built with Rust & Iced.")
                .size(13)
                .color(colors::TEXT_SECONDARY),
            Space::with_height(12),
            text(format!("Version {}", env!("CARGO_PKG_VERSION")))
                .size(12)
                .color(colors::TEXT_MUTED),
            Space::with_height(20),
            button(text("Close").size(13).color(Color::WHITE))
                .padding(Padding::from([8, 24]))
                .style(|_: &Theme, status: button::Status| {
                    let bg = match status {
                        button::Status::Hovered => Color::from_rgb(0.40, 0.58, 0.95),
                        _ => colors::ACCENT,
                    };
                    button::Style {
                        background: Some(Background::Color(bg)),
                        text_color: Color::WHITE,
                        border: Border {
                            radius: 4.0.into(),
                            ..Default::default()
                        },
                        ..Default::default()
                    }
                })
                .on_press(Message::HideAbout),
        ]
        .padding(24)
        .width(Length::Fixed(340.0))
        .align_x(iced::Alignment::Center);

        container(container(modal_content).style(|_| container::Style {
            background: Some(Background::Color(colors::BG_MEDIUM)),
            border: Border {
                color: colors::BORDER,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        }))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
    }
}
