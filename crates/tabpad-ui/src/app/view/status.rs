use iced::widget::{container, horizontal_space, row, text, Space};
use iced::{Background, Border, Element, Length, Padding};

use crate::app::{App, Message};
use crate::theme::colors;

impl App {
    /// Transient message on the left, line and character counts on the right.
    pub fn view_status_bar(&self) -> Element<'_, Message> {
        let status_content = row![
            text(&self.status_message)
                .size(12)
                .color(colors::TEXT_SECONDARY),
            horizontal_space(),
            text(self.host.status_counts())
                .size(12)
                .color(colors::TEXT_PRIMARY),
            Space::with_width(12),
        ]
        .padding(Padding::from([6, 12]))
        .align_y(iced::Alignment::Center);

        container(status_content)
            .width(Length::Fill)
            .height(28)
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BG_MEDIUM)),
                border: Border {
                    color: colors::BORDER,
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }
}
