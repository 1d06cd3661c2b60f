use iced::keyboard::{self, key::Named};
use iced::widget::scrollable::{self, AbsoluteOffset};
use iced::widget::text_editor::Action;
use iced::Task;
use std::path::Path;

use tabpad_core::event;
use tabpad_core::{CloseOutcome, Command, CoreError, Key, KeyPress, Modifiers};

use super::{App, Message};
use crate::dialogs::NativeChooser;
use crate::style::EditorStyle;
use crate::widget::{moves_cursor, EditorWidget};

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::Command(cmd) => {
                self.active_menu = None;
                self.run_command(cmd)
            }

            Message::EditorAction(action) => {
                self.active_menu = None;
                self.editor_action(action)
            }

            Message::EditorScrolled { offset, height } => {
                self.viewport_height = height;
                if let Some(widget) = self.host.active_widget_mut() {
                    widget.set_scroll_offset(offset);
                }
                Task::none()
            }

            Message::TabSelected(idx) => {
                self.active_menu = None;
                self.host.select(idx);
                self.restore_scroll()
            }

            Message::CloseTab(idx) => {
                self.active_menu = None;
                self.close_tab(idx)
            }

            Message::ToggleTopMenu(menu) => {
                if self.active_menu == Some(menu) {
                    self.active_menu = None;
                } else {
                    self.active_menu = Some(menu);
                }
                Task::none()
            }

            Message::CloseTopMenu => {
                self.active_menu = None;
                self.about_visible = false;
                Task::none()
            }

            Message::MenuHovered(cmd) => {
                self.status_message = cmd.status_tip().to_string();
                Task::none()
            }

            Message::HideAbout => {
                self.about_visible = false;
                Task::none()
            }

            Message::KeyPressed(key, modifiers) => self.handle_key_pressed(key, modifiers),
        };

        self.drain_events();
        task
    }

    /// Carries out a menu or keyboard command.
    pub fn run_command(&mut self, cmd: Command) -> Task<Message> {
        tracing::debug!("Running {}", cmd);

        match cmd {
            Command::NewTab => {
                self.host.new_tab();
                return self.restore_scroll();
            }

            Command::Open => {
                let mut chooser = NativeChooser::new(&self.config.files.filters);
                if let Err(err) = self.host.open_with(&mut chooser) {
                    self.report(&err);
                }
                return self.restore_scroll();
            }

            Command::Save => {
                let mut chooser = NativeChooser::new(&self.config.files.filters);
                if let Err(err) = self.host.save_with(&mut chooser) {
                    self.report(&err);
                }
            }

            Command::SaveAs => {
                let mut chooser = NativeChooser::new(&self.config.files.filters);
                if let Err(err) = self.host.save_as_with(&mut chooser) {
                    self.report(&err);
                }
            }

            Command::CloseTab => {
                return self.close_tab(self.host.active_index());
            }

            Command::Exit => {
                tracing::info!("Exit requested");
                return iced::exit();
            }

            Command::Undo => {
                if let Some(widget) = self.host.active_widget_mut() {
                    self.status_message = if widget.undo() {
                        "Undo".to_string()
                    } else {
                        "Nothing to undo".to_string()
                    };
                }
            }

            Command::Redo => {
                if let Some(widget) = self.host.active_widget_mut() {
                    self.status_message = if widget.redo() {
                        "Redo".to_string()
                    } else {
                        "Nothing to redo".to_string()
                    };
                }
            }

            Command::Cut => {
                if let Some(widget) = self.host.active_widget_mut() {
                    match widget.cut() {
                        Some(selected) => {
                            clipboard_set(&selected);
                            self.status_message = "Cut".to_string();
                        }
                        None => self.status_message = "Nothing selected".to_string(),
                    }
                }
            }

            Command::Copy => match self.host.active_widget().and_then(EditorWidget::selection) {
                Some(selected) => {
                    clipboard_set(&selected);
                    self.status_message = "Copied".to_string();
                }
                None => self.status_message = "Nothing selected".to_string(),
            },

            Command::Paste => {
                if let Some(text) = clipboard_get() {
                    if let Some(widget) = self.host.active_widget_mut() {
                        widget.paste(text);
                    }
                    self.status_message = "Pasted".to_string();
                    return self.follow_cursor();
                }
            }

            Command::SelectAll => {
                if let Some(widget) = self.host.active_widget_mut() {
                    widget.select_all();
                }
            }

            Command::ZoomIn => self.set_style(self.style.zoomed_in()),
            Command::ZoomOut => self.set_style(self.style.zoomed_out()),
            Command::ZoomReset => self.set_style(EditorStyle::from_config(&self.config.ui)),

            Command::NextTab => {
                self.host.next_tab();
                return self.restore_scroll();
            }

            Command::PrevTab => {
                self.host.prev_tab();
                return self.restore_scroll();
            }

            Command::About => {
                self.about_visible = true;
            }
        }

        Task::none()
    }

    /// Opens a file named on the command line.
    pub fn open_path(&mut self, path: &Path) {
        if let Err(err) = self.host.open_path(path) {
            self.report(&err);
        }
        self.drain_events();
    }

    fn close_tab(&mut self, idx: usize) -> Task<Message> {
        match self.host.close(idx) {
            CloseOutcome::Closed(_) => self.restore_scroll(),
            CloseOutcome::LastTab | CloseOutcome::NoSuchTab => Task::none(),
        }
    }

    fn editor_action(&mut self, action: Action) -> Task<Message> {
        // The editor is as tall as its text, so wheel scrolling has to move
        // the surrounding scrollable instead.
        if let Action::Scroll { lines } = action {
            let current = self.host.active_widget().map_or(0.0, EditorWidget::scroll_offset);
            let delta = lines as f32 * self.style.metrics().line_height;
            return self.scroll_editor_to(current + delta);
        }

        let follow = moves_cursor(&action);
        if let Some(widget) = self.host.active_widget_mut() {
            widget.perform(action);
        }

        if follow {
            self.follow_cursor()
        } else {
            Task::none()
        }
    }

    fn set_style(&mut self, style: EditorStyle) {
        self.style = style;
        self.status_message = format!("Zoom: {}px", self.style.font_size);
    }

    /// Scrolls so the cursor line is fully visible.
    fn follow_cursor(&mut self) -> Task<Message> {
        let Some(widget) = self.host.active_widget() else {
            return Task::none();
        };
        match scroll_target(
            &self.style,
            widget.cursor_line(),
            widget.scroll_offset(),
            self.viewport_height,
        ) {
            Some(offset) => self.scroll_editor_to(offset),
            None => Task::none(),
        }
    }

    fn scroll_editor_to(&mut self, offset: f32) -> Task<Message> {
        let Some(widget) = self.host.active_widget_mut() else {
            return Task::none();
        };
        let content_height = self.style.padding_top
            + widget.line_count() as f32 * self.style.metrics().line_height
            + self.style.padding_bottom;
        let max = (content_height - self.viewport_height).max(0.0);
        let offset = offset.clamp(0.0, max);

        widget.set_scroll_offset(offset);
        scrollable::scroll_to(
            self.editor_scroll_id.clone(),
            AbsoluteOffset { x: 0.0, y: offset },
        )
    }

    /// Puts the scrollable back where the active tab left it.
    fn restore_scroll(&self) -> Task<Message> {
        let offset = self.host.active_widget().map_or(0.0, EditorWidget::scroll_offset);
        scrollable::scroll_to(
            self.editor_scroll_id.clone(),
            AbsoluteOffset { x: 0.0, y: offset },
        )
    }

    fn report(&mut self, err: &CoreError) {
        tracing::error!("{}", err);
        // Events from the failed operation would overwrite the message.
        self.drain_events();
        self.status_message = match err {
            CoreError::FileRead { source, .. } => format!("Error opening file: {}", source),
            CoreError::FileWrite { source, .. } => format!("Error saving file: {}", source),
        };
    }

    fn drain_events(&mut self) {
        for event in event::drain(&mut self.events) {
            if let Some(text) = event.status_text() {
                self.status_message = text;
            }
        }
    }

    pub fn handle_key_pressed(
        &mut self,
        key: keyboard::Key,
        modifiers: keyboard::Modifiers,
    ) -> Task<Message> {
        if matches!(key, keyboard::Key::Named(Named::Escape))
            && (self.active_menu.is_some() || self.about_visible)
        {
            return self.update(Message::CloseTopMenu);
        }

        let Some(press) = key_press(&key, modifiers) else {
            return Task::none();
        };
        match self.keymap.resolve(&press) {
            Some(cmd) => self.update(Message::Command(cmd)),
            None => Task::none(),
        }
    }
}

/// Converts an iced key event into a keymap key press.
pub fn key_press(key: &keyboard::Key, modifiers: keyboard::Modifiers) -> Option<KeyPress> {
    let key = match key.as_ref() {
        keyboard::Key::Character(c) => {
            let ch = c.chars().next()?.to_lowercase().next()?;
            Key::Char(ch)
        }
        keyboard::Key::Named(named) => match named {
            Named::Tab => Key::Tab,
            Named::Enter => Key::Enter,
            Named::Escape => Key::Escape,
            Named::Backspace => Key::Backspace,
            Named::Delete => Key::Delete,
            Named::Home => Key::Home,
            Named::End => Key::End,
            Named::PageUp => Key::PageUp,
            Named::PageDown => Key::PageDown,
            Named::Space => Key::Space,
            Named::F1 => Key::F(1),
            Named::F2 => Key::F(2),
            Named::F3 => Key::F(3),
            Named::F4 => Key::F(4),
            Named::F5 => Key::F(5),
            Named::F6 => Key::F(6),
            Named::F7 => Key::F(7),
            Named::F8 => Key::F(8),
            Named::F9 => Key::F(9),
            Named::F10 => Key::F(10),
            Named::F11 => Key::F(11),
            Named::F12 => Key::F(12),
            _ => return None,
        },
        keyboard::Key::Unidentified => return None,
    };

    // `command` is Ctrl everywhere except macOS, where it is Cmd.
    let modifiers = Modifiers {
        ctrl: modifiers.command(),
        alt: modifiers.alt(),
        shift: modifiers.shift(),
        meta: modifiers.logo() && !modifiers.command(),
    };
    Some(KeyPress::new(key, modifiers))
}

/// Scroll offset that brings `cursor_line` fully into view, or `None` when
/// it already is or the viewport size is not known yet.
pub fn scroll_target(
    style: &EditorStyle,
    cursor_line: usize,
    offset: f32,
    viewport_height: f32,
) -> Option<f32> {
    if viewport_height <= 0.0 {
        return None;
    }
    let line_height = style.metrics().line_height;
    let top = style.padding_top + cursor_line as f32 * line_height;
    let bottom = top + line_height;

    if top < offset {
        Some(top - style.padding_top)
    } else if bottom > offset + viewport_height {
        Some(bottom + style.padding_bottom - viewport_height)
    } else {
        None
    }
}

fn clipboard_set(text: &str) {
    if let Err(e) = arboard::Clipboard::new().and_then(|mut c| c.set_text(text)) {
        tracing::warn!("Clipboard write failed: {}", e);
    }
}

fn clipboard_get() -> Option<String> {
    match arboard::Clipboard::new().and_then(|mut c| c.get_text()) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::warn!("Clipboard read failed: {}", e);
            None
        }
    }
}
