//! # Tabpad Core
//!
//! Toolkit-independent logic for the Tabpad notepad.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        TabHost<W>                         │
//! │  ┌────────────┐ ┌─────────────┐ ┌──────────────────────┐ │
//! │  │  EventBus  │ │ FileChooser │ │   DocumentStats      │ │
//! │  └────────────┘ └─────────────┘ └──────────────────────┘ │
//! │  ┌────────────────────────────────────────────┐          │
//! │  │  Tab 1  │  Tab 2  │  Tab 3  (W: TextWidget) │          │
//! │  └────────────────────────────────────────────┘          │
//! └──────────────────────────────────────────────────────────┘
//!
//!   CommandRegistry ── Keymap          LineNumberGutter ── BlockLayout
//! ```
//!
//! The GUI crate supplies the concrete `TextWidget` (backed by the toolkit's
//! text editor), the `FileChooser` (native dialogs) and the `BlockLayout`
//! used by the gutter. Everything here can be driven headless, which is how
//! the tests exercise it.

pub mod command;
pub mod config;
pub mod document;
pub mod event;
pub mod gutter;
pub mod host;
pub mod keymap;
pub mod line_ending;

pub use command::{Command, CommandRegistry, Menu, MenuEntry};
pub use config::Config;
pub use document::{DocumentStats, Tab, TabId, TextWidget};
pub use event::{EventBus, TabEvent};
pub use gutter::{BlockLayout, FontMetrics, LineLabel, LineNumberGutter, PaintRegion, UniformLayout};
pub use host::{CloseOutcome, FileChooser, SaveOutcome, TabHost};
pub use keymap::{Key, KeyPress, Keymap, Modifiers};
pub use line_ending::{LineEnding, LineMap};

use std::path::PathBuf;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors surfaced by tab host file operations.
///
/// Both carry the path involved and the underlying OS error. They are never
/// fatal: the UI turns them into a status-bar message and keeps running.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("cannot read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    /// Returns the path the failed operation was working on.
    pub fn path(&self) -> &std::path::Path {
        match self {
            CoreError::FileRead { path, .. } | CoreError::FileWrite { path, .. } => path,
        }
    }
}
