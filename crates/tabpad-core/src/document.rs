//! Tabs and the text-widget seam.
//!
//! ## Learning: Newtypes and Generic Owners
//!
//! `TabId` wraps a `Uuid` so a tab id can't be mixed up with any other
//! identifier. `Tab<W>` owns its widget outright; the host never hands out
//! the widget by value, only borrows.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Unique identifier for a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(Uuid);

impl TabId {
    /// Creates a new unique tab ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The toolkit text widget as seen by the tab host.
///
/// Storage, cursor, selection and clipboard stay inside the toolkit; the
/// host only needs whole-text access for open and save.
pub trait TextWidget {
    /// Returns the full plain-text content.
    fn text(&self) -> String;

    /// Replaces the full content.
    fn set_text(&mut self, text: &str);

    /// Returns line and character counts for the status bar.
    fn stats(&self) -> DocumentStats {
        DocumentStats::of(&self.text())
    }
}

/// Plain string widget, handy for headless use.
impl TextWidget for String {
    fn text(&self) -> String {
        self.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }

    fn stats(&self) -> DocumentStats {
        DocumentStats::of(self)
    }
}

/// Line and character counts of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentStats {
    /// Number of blocks: `'\n'`-separated segments, never less than 1.
    pub lines: usize,
    /// Number of Unicode scalar values.
    pub chars: usize,
}

impl DocumentStats {
    /// Computes the counts for `text`.
    pub fn of(text: &str) -> Self {
        Self {
            lines: text.split('\n').count(),
            chars: text.chars().count(),
        }
    }
}

impl std::fmt::Display for DocumentStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lines: {} | Chars: {}", self.lines, self.chars)
    }
}

/// One open document.
pub struct Tab<W> {
    id: TabId,
    widget: W,
    path: Option<PathBuf>,
    title: String,
}

impl<W> Tab<W> {
    /// Creates an unbound tab with the given placeholder title.
    pub fn untitled(widget: W, title: impl Into<String>) -> Self {
        Self {
            id: TabId::new(),
            widget,
            path: None,
            title: title.into(),
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    /// Returns the bound file path, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Binds the tab to `path` and retitles it with the file's base name.
    pub fn bind_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.title = display_name(&path);
        self.path = Some(path);
    }
}

/// Base name of `path` for tab and window titles.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_of_empty_document() {
        let stats = DocumentStats::of("");
        assert_eq!(stats, DocumentStats { lines: 1, chars: 0 });
    }

    #[test]
    fn test_stats_of_three_lines() {
        let stats = DocumentStats::of("a\nb\nc");
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.chars, 5);
        assert_eq!(stats.to_string(), "Lines: 3 | Chars: 5");
    }

    #[test]
    fn test_trailing_newline_opens_a_block() {
        assert_eq!(DocumentStats::of("a\n").lines, 2);
    }

    #[test]
    fn test_chars_count_scalars_not_bytes() {
        assert_eq!(DocumentStats::of("héllo").chars, 5);
    }

    #[test]
    fn test_bind_path_retitles() {
        let mut tab = Tab::untitled(String::new(), "Untitled-1");
        assert!(tab.path().is_none());
        tab.bind_path("/tmp/notes/todo.txt");
        assert_eq!(tab.title(), "todo.txt");
        assert_eq!(tab.path(), Some(Path::new("/tmp/notes/todo.txt")));
    }

    #[test]
    fn test_string_widget_set_text() {
        let mut widget = String::from("old");
        widget.set_text("new");
        assert_eq!(widget.text(), "new");
    }

    #[test]
    fn test_tab_ids_are_unique() {
        assert_ne!(TabId::new(), TabId::new());
    }
}
