//! Style definitions for UI components.

use iced::Padding;
use iced::widget::text::LineHeight;
use tabpad_core::FontMetrics;
use tabpad_core::config::UiConfig;

/// Smallest font size zoom can reach.
pub const MIN_FONT_SIZE: f32 = 8.0;
/// Largest font size zoom can reach.
pub const MAX_FONT_SIZE: f32 = 40.0;
/// Font size change per zoom step.
pub const ZOOM_STEP: f32 = 2.0;

/// Geometry of the editor area.
///
/// The gutter and the text editor both read from this, so line tops agree
/// between the two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorStyle {
    pub font_size: f32,
    /// Line height as a multiple of the font size
    pub line_height: f32,
    pub padding_top: f32,
    pub padding_right: f32,
    pub padding_bottom: f32,
    pub padding_left: f32,
}

impl EditorStyle {
    /// Style for the configured font at its default size.
    pub fn from_config(ui: &UiConfig) -> Self {
        Self {
            font_size: ui.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            line_height: ui.line_height,
            ..Self::default()
        }
    }

    pub fn metrics(&self) -> FontMetrics {
        FontMetrics::monospace(self.font_size, self.line_height)
    }

    pub fn text_line_height(&self) -> LineHeight {
        LineHeight::Relative(self.line_height)
    }

    pub fn padding(&self) -> Padding {
        Padding {
            top: self.padding_top,
            right: self.padding_right,
            bottom: self.padding_bottom,
            left: self.padding_left,
        }
    }

    /// Returns the style one zoom step larger, clamped.
    pub fn zoomed_in(self) -> Self {
        self.with_font_size(self.font_size + ZOOM_STEP)
    }

    /// Returns the style one zoom step smaller, clamped.
    pub fn zoomed_out(self) -> Self {
        self.with_font_size(self.font_size - ZOOM_STEP)
    }

    pub fn with_font_size(self, size: f32) -> Self {
        Self {
            font_size: size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            ..self
        }
    }
}

impl Default for EditorStyle {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            line_height: 1.3,
            padding_top: 8.0,
            padding_right: 16.0,
            padding_bottom: 8.0,
            padding_left: 8.0,
        }
    }
}
