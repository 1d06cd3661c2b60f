use iced::widget::{button, column, container, horizontal_space, mouse_area, row, text, Column, Row, Space};
use iced::{Background, Border, Color, Element, Length, Padding, Theme};
use tabpad_core::{Command, MenuEntry};

use crate::app::{App, Message};
use crate::theme::colors;

/// Height of the menu bar, where dropdowns start.
const TOOLBAR_HEIGHT: f32 = 32.0;

impl App {
    pub fn view_toolbar(&self) -> Element<'_, Message> {
        let mut menu_items: Vec<Element<'_, Message>> = Vec::new();

        for (idx, menu) in self.registry.menus().iter().enumerate() {
            let is_active = self.active_menu == Some(idx);

            let menu_btn = button(text(menu.title).size(12).color(if is_active {
                colors::TEXT_PRIMARY
            } else {
                colors::TEXT_SECONDARY
            }))
            .padding(Padding::from([6, 10]))
            .style(move |_: &Theme, status: button::Status| {
                let bg = if is_active {
                    colors::BG_ACTIVE
                } else {
                    match status {
                        button::Status::Hovered => colors::BG_HOVER,
                        _ => colors::BG_MEDIUM,
                    }
                };
                button::Style {
                    background: Some(Background::Color(bg)),
                    text_color: colors::TEXT_PRIMARY,
                    border: Border {
                        radius: 4.0.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                }
            })
            .on_press(Message::ToggleTopMenu(idx));

            menu_items.push(menu_btn.into());
        }

        menu_items.push(horizontal_space().into());

        let toolbar = Row::with_children(menu_items)
            .spacing(2)
            .padding(Padding::from([4, 8]))
            .align_y(iced::Alignment::Center);

        container(toolbar)
            .width(Length::Fill)
            .height(TOOLBAR_HEIGHT)
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

    /// One dropdown row: label, shortcut, and the command it fires.
    ///
    /// Hovering shows the command's status tip.
    pub fn menu_item<'a>(cmd: Command, shortcut: String) -> Element<'a, Message> {
        let item = button(
            row![
                text(cmd.label()).size(12).color(colors::TEXT_PRIMARY),
                horizontal_space(),
                text(shortcut).size(11).color(colors::TEXT_MUTED),
            ]
            .width(Length::Fill)
            .align_y(iced::Alignment::Center),
        )
        .width(Length::Fill)
        .padding(Padding::from([6, 16]))
        .style(|_: &Theme, status: button::Status| {
            let bg = match status {
                button::Status::Hovered => colors::BG_HOVER,
                _ => Color::TRANSPARENT,
            };
            button::Style {
                background: Some(Background::Color(bg)),
                text_color: colors::TEXT_PRIMARY,
                border: Border::default(),
                ..Default::default()
            }
        })
        .on_press(Message::Command(cmd));

        mouse_area(item).on_enter(Message::MenuHovered(cmd)).into()
    }

    pub fn menu_separator<'a>() -> Element<'a, Message> {
        container(Space::new(Length::Fill, 1))
            .padding(Padding::from([4, 8]))
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BORDER)),
                ..Default::default()
            })
            .into()
    }

    pub fn view_menu_dropdown(&self) -> Element<'_, Message> {
        let Some(menu) = self.active_menu.and_then(|idx| self.registry.menus().get(idx)) else {
            return Space::new(0, 0).into();
        };

        let items: Vec<Element<'_, Message>> = menu
            .entries
            .iter()
            .map(|entry| match *entry {
                MenuEntry::Item(cmd) => {
                    Self::menu_item(cmd, self.keymap.shortcut_for(cmd).unwrap_or_default())
                }
                MenuEntry::Separator => Self::menu_separator(),
            })
            .collect();

        let menu_content = Column::with_children(items)
            .width(Length::Fixed(240.0))
            .padding(4);

        let menu_box = container(menu_content).style(|_| container::Style {
            background: Some(Background::Color(colors::BG_MEDIUM)),
            border: Border {
                color: colors::BORDER,
                width: 1.0,
                radius: 6.0.into(),
            },
            ..Default::default()
        });

        column![
            Space::with_height(Length::Fixed(TOOLBAR_HEIGHT)),
            row![
                Space::with_width(Length::Fixed(self.menu_offset_x())),
                menu_box,
            ],
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    /// Approximate left edge of the open menu's title button.
    fn menu_offset_x(&self) -> f32 {
        let Some(active) = self.active_menu else {
            return 0.0;
        };
        self.registry
            .menus()
            .iter()
            .take(active)
            // 7px per glyph at size 12, 20px padding, 2px spacing
            .map(|menu| menu.title.len() as f32 * 7.0 + 22.0)
            .sum::<f32>()
            + 8.0
    }
}
