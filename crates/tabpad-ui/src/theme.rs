//! Colors and the iced theme.
//!
//! The window chrome uses a fixed dark palette; widgets pull their colors
//! from `colors` rather than from the iced theme so that every view looks
//! the same regardless of the toolkit default.

/// Dark palette shared by every view.
pub mod colors {
    use iced::Color;

    pub const BG_DARK: Color = Color::from_rgb(0.11, 0.11, 0.13);
    pub const BG_MEDIUM: Color = Color::from_rgb(0.14, 0.14, 0.16);
    pub const BG_LIGHT: Color = Color::from_rgb(0.18, 0.18, 0.20);
    pub const BG_HOVER: Color = Color::from_rgb(0.22, 0.22, 0.25);
    pub const BG_ACTIVE: Color = Color::from_rgb(0.25, 0.25, 0.28);

    pub const TEXT_PRIMARY: Color = Color::from_rgb(0.93, 0.93, 0.93);
    pub const TEXT_SECONDARY: Color = Color::from_rgb(0.65, 0.65, 0.68);
    pub const TEXT_MUTED: Color = Color::from_rgb(0.45, 0.45, 0.48);

    pub const ACCENT: Color = Color::from_rgb(0.36, 0.54, 0.90);
    pub const ERROR: Color = Color::from_rgb(0.9, 0.4, 0.4);

    pub const BORDER: Color = Color::from_rgb(0.25, 0.25, 0.28);

    pub const SELECTION: Color = Color::from_rgba(0.25, 0.46, 0.85, 0.55);
    pub const OVERLAY: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.5);

    /// Gutter background, one step lighter than the editor
    pub const GUTTER_BG: Color = BG_MEDIUM;
    pub const GUTTER_TEXT: Color = TEXT_MUTED;
}

/// Theme handed to `iced::application`.
pub fn iced_theme() -> iced::Theme {
    iced::Theme::Dark
}
