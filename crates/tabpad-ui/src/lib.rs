//! # Tabpad UI
//!
//! The notepad window, built on iced.
//!
//! ## Architecture
//!
//! The UI follows the Elm architecture (TEA):
//! - **Model**: [`App`] owns a `TabHost<EditorWidget>` plus view state
//! - **Message**: menu commands, editor actions, tab clicks, key presses
//! - **Update**: runs the command against the host, then drains host events
//!   into the status bar
//! - **View**: menu bar, tab strip, gutter + editor, status bar
//!
//! ## Learning: Keeping Logic Out of the View
//!
//! Everything that decides *what* happens lives in `tabpad-core` and is
//! tested headless. This crate only adapts iced's text editor, canvas and
//! native dialogs to the traits the core expects.

pub mod app;
pub mod dialogs;
pub mod gutter;
pub mod style;
pub mod theme;
pub mod widget;

pub use app::{run, App, Flags};
