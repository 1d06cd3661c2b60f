//! The iced text editor behind each tab.
//!
//! `text_editor::Content` stores the text, cursor and selection. It keeps
//! bare lines only, so the adapter records the original line breaks in a
//! `LineMap` and follows every edit with it; an untouched document saves
//! back byte for byte.
//!
//! iced has no undo stack of its own either, so the adapter keeps a bounded
//! history of whole-text snapshots taken before every edit.

use iced::widget::text_editor::{Action, Content, Edit};
use std::sync::Arc;
use tabpad_core::line_ending::to_lf;
use tabpad_core::{DocumentStats, LineMap, TextWidget};

/// Most snapshots kept per direction.
const HISTORY_LIMIT: usize = 100;

/// Text widget for one tab.
pub struct EditorWidget {
    content: Content,
    /// Breaks between the lines `content` shows
    lines: LineMap,
    undo_stack: Vec<String>,
    redo_stack: Vec<String>,
    /// Vertical scroll offset of the tab's view, in pixels
    scroll_offset: f32,
}

impl EditorWidget {
    pub fn new() -> Self {
        Self {
            content: Content::new(),
            lines: LineMap::default(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            scroll_offset: 0.0,
        }
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn line_count(&self) -> usize {
        self.content.line_count()
    }

    /// Zero-based line of the cursor.
    pub fn cursor_line(&self) -> usize {
        self.content.cursor_position().0
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = offset.max(0.0);
    }

    pub fn selection(&self) -> Option<String> {
        self.content.selection()
    }

    /// Applies an editor action, recording a snapshot first if it edits.
    ///
    /// Returns true when the text may have changed.
    pub fn perform(&mut self, action: Action) -> bool {
        let action = match action {
            // Pasted breaks become plain lines; the line map picks their ending.
            Action::Edit(Edit::Paste(text)) if text.contains('\r') => {
                Action::Edit(Edit::Paste(Arc::new(to_lf(&text))))
            }
            action => action,
        };

        let is_edit = action.is_edit();
        if is_edit {
            self.save_undo_state();
        }
        self.content.perform(action);
        if is_edit {
            let shown = self.shown_lines();
            self.lines.sync(shown);
        }
        is_edit
    }

    /// Removes the selection and returns it.
    pub fn cut(&mut self) -> Option<String> {
        let selected = self.content.selection()?;
        self.perform(Action::Edit(Edit::Delete));
        Some(selected)
    }

    /// Inserts `text` at the cursor, replacing any selection.
    pub fn paste(&mut self, text: String) {
        self.perform(Action::Edit(Edit::Paste(Arc::new(text))));
    }

    pub fn select_all(&mut self) {
        self.content.perform(Action::SelectAll);
    }

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        let current = self.text();
        push_bounded(&mut self.redo_stack, current);
        self.load(&previous);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let current = self.text();
        push_bounded(&mut self.undo_stack, current);
        self.load(&next);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn save_undo_state(&mut self) {
        let current = self.text();
        // Only save if different from last state
        if self.undo_stack.last() != Some(&current) {
            push_bounded(&mut self.undo_stack, current);
            self.redo_stack.clear();
        }
    }

    /// Replaces the content without touching the history.
    fn load(&mut self, text: &str) {
        let mut lines = LineMap::parse(text);
        self.content = Content::with_text(&lines.normalized());
        lines.attach(self.shown_lines());
        self.lines = lines;
    }

    fn shown_lines(&self) -> Vec<String> {
        (0..self.content.line_count())
            .filter_map(|i| self.content.line(i).map(|line| line.to_string()))
            .collect()
    }
}

impl Default for EditorWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl TextWidget for EditorWidget {
    fn text(&self) -> String {
        self.lines.text()
    }

    fn set_text(&mut self, text: &str) {
        self.load(text);
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    // Each line break counts as one character, "\r\n" included.
    fn stats(&self) -> DocumentStats {
        DocumentStats {
            lines: self.lines.line_count(),
            chars: self.lines.char_count(),
        }
    }
}

fn push_bounded(stack: &mut Vec<String>, text: String) {
    stack.push(text);
    if stack.len() > HISTORY_LIMIT {
        stack.remove(0);
    }
}

/// True when `action` may move the cursor, so the view should follow it.
pub fn moves_cursor(action: &Action) -> bool {
    matches!(
        action,
        Action::Move(_) | Action::Select(_) | Action::Edit(_) | Action::Click(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::widget::text_editor::Motion;
    use tabpad_core::TabHost;

    fn widget(text: &str) -> EditorWidget {
        let mut widget = EditorWidget::new();
        widget.set_text(text);
        widget
    }

    fn type_char(widget: &mut EditorWidget, c: char) {
        widget.perform(Action::Edit(Edit::Insert(c)));
    }

    #[test]
    fn test_text_round_trips() {
        for text in [
            "",
            "one line",
            "a\nb\nc",
            "trailing\n",
            "\n\n",
            "dos\r\nlines\r\n",
            "unix\nwindows\r\nunix again\n",
            "classic\rmac\r",
            "mixed\r\nno final break\rend",
        ] {
            assert_eq!(widget(text).text(), text);
        }
    }

    #[test]
    fn test_editing_one_line_keeps_other_breaks() {
        let mut w = widget("first\r\nsecond\nthird\r");
        w.perform(Action::Move(Motion::DocumentStart));
        w.perform(Action::Move(Motion::Down));
        w.perform(Action::Move(Motion::End));
        type_char(&mut w, '!');
        assert_eq!(w.text(), "first\r\nsecond!\nthird\r");
    }

    #[test]
    fn test_typed_lines_count_like_plain_text() {
        let mut w = EditorWidget::new();
        type_char(&mut w, 'a');
        w.perform(Action::Edit(Edit::Enter));
        type_char(&mut w, 'b');
        w.perform(Action::Edit(Edit::Enter));
        type_char(&mut w, 'c');

        assert_eq!(w.text(), "a\nb\nc");
        assert_eq!(w.line_count(), 3);
        assert_eq!(w.stats(), DocumentStats { lines: 3, chars: 5 });
    }

    #[test]
    fn test_enter_uses_the_file_ending() {
        let mut w = widget("x\r\ny");
        w.perform(Action::Move(Motion::DocumentEnd));
        w.perform(Action::Edit(Edit::Enter));
        type_char(&mut w, 'z');
        assert_eq!(w.text(), "x\r\ny\r\nz");
    }

    #[test]
    fn test_pasted_crlf_follows_document() {
        let mut w = widget("");
        w.paste("p\r\nq".to_string());
        assert_eq!(w.text(), "p\nq");
        assert_eq!(w.line_count(), 2);
    }

    #[test]
    fn test_undo_restores_original_breaks() {
        let text = "a\r\nb\rc\n";
        let mut w = widget(text);
        type_char(&mut w, 'x');
        assert_ne!(w.text(), text);
        assert!(w.undo());
        assert_eq!(w.text(), text);
    }

    #[test]
    fn test_host_save_as_then_open_is_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = TabHost::new(EditorWidget::new);

        for (i, text) in [
            "unix\nwindows\r\nunix again",
            "classic\rmac\r",
            "unix\nwindows\r\nmac\rtrailing\n",
            "no trailing break\r\nat all",
        ]
        .into_iter()
        .enumerate()
        {
            let path = dir.path().join(format!("doc{i}.txt"));
            host.new_tab();
            host.active_widget_mut().unwrap().set_text(text);
            host.save_as_path(&path).unwrap();
            assert_eq!(std::fs::read_to_string(&path).unwrap(), text);

            host.open_path(&path).unwrap();
            assert_eq!(host.active_widget().unwrap().text(), text);

            // A plain save of the reopened tab leaves the bytes alone.
            host.save_as_path(&path).unwrap();
            assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
        }
    }

    #[test]
    fn test_stats_match_plain_text() {
        for text in ["", "a\nb\nc", "héllo\nwörld\n"] {
            assert_eq!(widget(text).stats(), DocumentStats::of(text));
        }
    }

    #[test]
    fn test_undo_redo_restores_snapshots() {
        let mut w = widget("");
        type_char(&mut w, 'a');
        type_char(&mut w, 'b');
        assert_eq!(w.text(), "ab");

        assert!(w.undo());
        assert_eq!(w.text(), "a");
        assert!(w.undo());
        assert_eq!(w.text(), "");
        assert!(!w.undo());

        assert!(w.redo());
        assert_eq!(w.text(), "a");
        assert!(w.can_redo());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut w = widget("");
        type_char(&mut w, 'a');
        w.undo();
        type_char(&mut w, 'z');
        assert!(!w.can_redo());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut w = widget("");
        for _ in 0..(HISTORY_LIMIT + 20) {
            type_char(&mut w, 'x');
        }
        let mut undos = 0;
        while w.undo() {
            undos += 1;
        }
        assert_eq!(undos, HISTORY_LIMIT);
    }

    #[test]
    fn test_set_text_resets_history() {
        let mut w = widget("");
        type_char(&mut w, 'a');
        w.set_text("fresh");
        assert!(!w.can_undo());
    }

    #[test]
    fn test_cut_and_paste() {
        let mut w = widget("hello");
        w.select_all();
        assert_eq!(w.cut().as_deref(), Some("hello"));
        assert_eq!(w.text(), "");

        w.paste("again".to_string());
        assert_eq!(w.text(), "again");
        assert!(w.cut().is_none());
    }

    #[test]
    fn test_cursor_line_follows_moves() {
        let mut w = widget("a\nb\nc");
        w.perform(Action::Move(Motion::DocumentEnd));
        assert_eq!(w.cursor_line(), 2);
        assert!(moves_cursor(&Action::Move(Motion::Up)));
        assert!(!moves_cursor(&Action::Scroll { lines: 3 }));
    }
}
