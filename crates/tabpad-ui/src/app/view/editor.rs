use iced::widget::text::Wrapping;
use iced::widget::{button, container, horizontal_space, row, scrollable, text, text_editor, Row, Space};
use iced::{Background, Border, Color, Element, Font, Length, Padding, Theme};

use crate::app::{App, Message};
use crate::gutter::GutterView;
use crate::theme::colors;

impl App {
    pub fn view_tabs(&self) -> Element<'_, Message> {
        let mut tabs_vec: Vec<Element<'_, Message>> = Vec::new();

        for (idx, tab) in self.host.tabs().iter().enumerate() {
            let is_active = self.host.active_index() == idx;
            tabs_vec.push(Self::make_tab(tab.title(), idx, is_active));
        }

        tabs_vec.push(horizontal_space().into());

        let tabs_row = Row::with_children(tabs_vec)
            .spacing(1)
            .align_y(iced::Alignment::End);

        container(tabs_row)
            .width(Length::Fill)
            .height(36)
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

    pub fn make_tab<'a>(title: &'a str, idx: usize, is_active: bool) -> Element<'a, Message> {
        let close_btn = button(text("x").size(12).color(colors::TEXT_MUTED))
            .padding(Padding::from([2, 6]))
            .style(|_, status| {
                let bg = match status {
                    button::Status::Hovered => colors::BG_HOVER,
                    _ => Color::TRANSPARENT,
                };
                button::Style {
                    background: Some(Background::Color(bg)),
                    text_color: colors::TEXT_PRIMARY,
                    border: Border {
                        radius: 2.0.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                }
            })
            .on_press(Message::CloseTab(idx));

        let tab_content = row![
            text(title).size(13).color(if is_active {
                colors::TEXT_PRIMARY
            } else {
                colors::TEXT_SECONDARY
            }),
            Space::with_width(8),
            close_btn,
        ]
        .align_y(iced::Alignment::Center);

        let bg = if is_active {
            colors::BG_DARK
        } else {
            colors::BG_MEDIUM
        };

        button(tab_content)
            .padding(Padding::from([8, 14]))
            .style(move |_, status| {
                let hover_bg = match status {
                    button::Status::Hovered if !is_active => colors::BG_HOVER,
                    _ => bg,
                };
                button::Style {
                    background: Some(Background::Color(hover_bg)),
                    text_color: colors::TEXT_PRIMARY,
                    border: Border {
                        color: if is_active {
                            colors::ACCENT
                        } else {
                            Color::TRANSPARENT
                        },
                        width: if is_active { 2.0 } else { 0.0 },
                        radius: 0.0.into(),
                    },
                    ..Default::default()
                }
            })
            .on_press(Message::TabSelected(idx))
            .into()
    }

    /// Gutter and editor side by side.
    ///
    /// The editor keeps its natural height inside a scrollable so every line
    /// sits at `padding_top + n * line_height`, which is what the gutter
    /// assumes. Lines never wrap for the same reason.
    pub fn view_editor_area(&self) -> Element<'_, Message> {
        let Some(widget) = self.host.active_widget() else {
            return container(text("No file open").size(16).color(colors::TEXT_MUTED))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into();
        };

        let editor = text_editor(widget.content())
            .padding(self.style.padding())
            .font(Font::MONOSPACE)
            .size(self.style.font_size)
            .line_height(self.style.text_line_height())
            .wrapping(Wrapping::None)
            .style(|_theme: &Theme, _status| text_editor::Style {
                background: Background::Color(colors::BG_DARK),
                border: Border {
                    width: 0.0,
                    radius: 0.0.into(),
                    color: Color::TRANSPARENT,
                },
                icon: colors::TEXT_MUTED,
                placeholder: colors::TEXT_MUTED,
                value: colors::TEXT_PRIMARY,
                selection: colors::SELECTION,
            })
            .on_action(Message::EditorAction);

        let scroller = scrollable(editor)
            .id(self.editor_scroll_id.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .on_scroll(|viewport| Message::EditorScrolled {
                offset: viewport.absolute_offset().y,
                height: viewport.bounds().height,
            });

        let mut items: Vec<Element<'_, Message>> = Vec::new();
        if let Some(gutter) = self.gutter {
            let gutter_view = GutterView {
                gutter,
                line_count: widget.line_count(),
                scroll_offset: widget.scroll_offset(),
                style: self.style,
            };
            items.push(gutter_view.view());
        }
        items.push(scroller.into());

        Row::with_children(items).height(Length::Fill).into()
    }
}
