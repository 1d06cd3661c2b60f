//! Canvas painter for the line-number gutter.
//!
//! The canvas sits beside the editor's scrollable, not inside it. Every
//! frame it asks `LineNumberGutter` which lines intersect its own bounds at
//! the current scroll offset and draws their numbers right-aligned.

use iced::alignment::{Horizontal, Vertical};
use iced::mouse;
use iced::widget::canvas::{self, Canvas};
use iced::{Element, Font, Length, Pixels, Point, Rectangle, Renderer, Theme};
use tabpad_core::{LineNumberGutter, PaintRegion, UniformLayout};

use crate::style::EditorStyle;
use crate::theme::colors;

/// Per-frame inputs to the gutter painter.
#[derive(Debug, Clone, Copy)]
pub struct GutterView {
    pub gutter: LineNumberGutter,
    pub line_count: usize,
    pub scroll_offset: f32,
    pub style: EditorStyle,
}

impl GutterView {
    /// Width the gutter needs for the current line count and font.
    pub fn width(&self) -> f32 {
        self.gutter.width(self.line_count, self.style.metrics())
    }

    fn layout(&self) -> UniformLayout {
        UniformLayout {
            line_count: self.line_count,
            line_height: self.style.metrics().line_height,
            top_padding: self.style.padding_top,
        }
    }

    /// Wraps the painter in a canvas sized to the gutter width.
    pub fn view<'a, Message: 'a>(self) -> Element<'a, Message> {
        Canvas::new(self)
            .width(Length::Fixed(self.width()))
            .height(Length::Fill)
            .into()
    }
}

impl<Message> canvas::Program<Message> for GutterView {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), colors::GUTTER_BG);

        let region = PaintRegion::viewport(bounds.height);
        let labels = self.gutter.paint(&self.layout(), self.scroll_offset, region);

        for label in labels {
            frame.fill_text(canvas::Text {
                content: label.text,
                position: Point::new(bounds.width, label.y),
                color: colors::GUTTER_TEXT,
                size: Pixels(self.style.font_size),
                line_height: self.style.text_line_height(),
                font: Font::MONOSPACE,
                horizontal_alignment: Horizontal::Right,
                vertical_alignment: Vertical::Top,
                ..canvas::Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(line_count: usize) -> GutterView {
        GutterView {
            gutter: LineNumberGutter::default(),
            line_count,
            scroll_offset: 0.0,
            style: EditorStyle::default(),
        }
    }

    #[test]
    fn test_width_grows_with_digits() {
        let small = view(9).width();
        assert_eq!(view(9_999).width(), small);
        assert!(view(10_000).width() > small);
    }

    #[test]
    fn test_typed_lines_are_numbered_at_their_tops() {
        use crate::widget::EditorWidget;
        use iced::widget::text_editor::{Action, Edit};

        let mut widget = EditorWidget::new();
        for action in [
            Edit::Insert('a'),
            Edit::Enter,
            Edit::Insert('b'),
            Edit::Enter,
            Edit::Insert('c'),
        ] {
            widget.perform(Action::Edit(action));
        }

        let v = view(widget.line_count());
        let labels = v
            .gutter
            .paint(&v.layout(), 0.0, PaintRegion::viewport(600.0));

        let texts: Vec<_> = labels.iter().map(|l| l.text.trim()).collect();
        assert_eq!(texts, ["1", "2", "3"]);
        let line_height = v.style.metrics().line_height;
        for (i, label) in labels.iter().enumerate() {
            let expected = v.style.padding_top + i as f32 * line_height;
            assert!((label.y - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn test_layout_matches_editor_padding() {
        let v = view(3);
        let layout = v.layout();
        assert_eq!(layout.top_padding, v.style.padding_top);
        assert_eq!(layout.line_count, 3);
    }

    #[test]
    fn test_width_follows_zoom() {
        let mut v = view(100);
        let before = v.width();
        v.style = v.style.zoomed_in();
        assert!(v.width() > before);
    }
}
