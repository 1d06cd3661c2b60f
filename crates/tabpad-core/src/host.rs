//! The document tab host.
//!
//! `TabHost` owns the ordered tabs and the active index, and performs the
//! whole-file reads and writes behind Open, Save and Save-As. It is generic
//! over the text widget so the GUI can plug in the toolkit editor while tests
//! use plain strings.
//!
//! ## Invariants
//!
//! - There is always at least one tab: the host starts with one and refuses
//!   to close the last.
//! - `active` always indexes an existing tab.
//! - A tab's path only changes after a successful open or save-as.

use std::path::{Path, PathBuf};

use tokio::sync::broadcast;

use crate::document::{display_name, DocumentStats, Tab, TabId, TextWidget};
use crate::event::{EventBus, TabEvent};
use crate::{CoreError, CoreResult};

/// Prompts the user for file paths.
///
/// Returning `None` means the user cancelled the dialog.
pub trait FileChooser {
    /// Asks for an existing file to open.
    fn pick_open(&mut self) -> Option<PathBuf>;

    /// Asks for a destination, proposing `suggested_name`.
    fn pick_save(&mut self, suggested_name: &str) -> Option<PathBuf>;
}

/// Result of a save request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Content was written to this path
    Saved(PathBuf),
    /// The user dismissed the save dialog
    Cancelled,
}

/// Result of a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed(TabId),
    /// Refused: the last tab stays open
    LastTab,
    NoSuchTab,
}

/// Owns the open tabs.
pub struct TabHost<W> {
    tabs: Vec<Tab<W>>,
    active: usize,
    untitled_counter: usize,
    keep_tab_on_failed_open: bool,
    events: EventBus,
    make_widget: Box<dyn Fn() -> W>,
}

impl<W: TextWidget> TabHost<W> {
    /// Creates a host holding one empty untitled tab.
    ///
    /// `make_widget` builds the widget for every new tab.
    pub fn new(make_widget: impl Fn() -> W + 'static) -> Self {
        let mut host = Self {
            tabs: Vec::new(),
            active: 0,
            untitled_counter: 0,
            keep_tab_on_failed_open: true,
            events: EventBus::new(),
            make_widget: Box::new(make_widget),
        };
        host.new_tab();
        host
    }

    /// Chooses whether a failed open keeps the tab created for it.
    pub fn keep_tab_on_failed_open(mut self, keep: bool) -> Self {
        self.keep_tab_on_failed_open = keep;
        self
    }

    /// Subscribes to host events.
    pub fn subscribe(&self) -> broadcast::Receiver<TabEvent> {
        self.events.subscribe()
    }

    // ==================== Queries ====================

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn tabs(&self) -> &[Tab<W>] {
        &self.tabs
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Returns the active tab, or `None` when there is none.
    pub fn active(&self) -> Option<&Tab<W>> {
        self.tabs.get(self.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut Tab<W>> {
        self.tabs.get_mut(self.active)
    }

    /// Returns the active tab's widget.
    pub fn active_widget(&self) -> Option<&W> {
        self.active().map(Tab::widget)
    }

    pub fn active_widget_mut(&mut self) -> Option<&mut W> {
        self.active_mut().map(Tab::widget_mut)
    }

    /// Window title for the active tab.
    pub fn window_title(&self, app_name: &str) -> String {
        match self.active() {
            Some(tab) => format!("{} - {}", app_name, tab.title()),
            None => app_name.to_string(),
        }
    }

    /// Line and character counts of the active tab.
    pub fn stats(&self) -> Option<DocumentStats> {
        self.active_widget().map(TextWidget::stats)
    }

    /// Status-bar counts, empty when no tab is active.
    pub fn status_counts(&self) -> String {
        self.stats().map(|s| s.to_string()).unwrap_or_default()
    }

    // ==================== Tab lifecycle ====================

    /// Appends an empty untitled tab and activates it.
    pub fn new_tab(&mut self) -> TabId {
        self.untitled_counter += 1;
        let title = format!("Untitled-{}", self.untitled_counter);
        let tab = Tab::untitled((self.make_widget)(), title.clone());
        let id = tab.id();

        self.tabs.push(tab);
        self.active = self.tabs.len() - 1;
        self.events.emit(TabEvent::TabCreated { id, title });
        id
    }

    /// Closes the tab at `index` unless it is the last one.
    pub fn close(&mut self, index: usize) -> CloseOutcome {
        if index >= self.tabs.len() {
            return CloseOutcome::NoSuchTab;
        }
        if self.tabs.len() < 2 {
            self.events.emit(TabEvent::CloseRefused);
            return CloseOutcome::LastTab;
        }

        let id = self.remove(index);
        self.events.emit(TabEvent::TabClosed { id });
        CloseOutcome::Closed(id)
    }

    /// Closes the active tab unless it is the last one.
    pub fn close_active(&mut self) -> CloseOutcome {
        self.close(self.active)
    }

    /// Activates the tab at `index`.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(tab) = self.tabs.get(index) else {
            return false;
        };
        if index != self.active {
            self.active = index;
            self.events.emit(TabEvent::ActiveChanged { id: tab.id() });
        }
        true
    }

    /// Activates the next tab, wrapping around.
    pub fn next_tab(&mut self) {
        let next = (self.active + 1) % self.tabs.len();
        self.select(next);
    }

    /// Activates the previous tab, wrapping around.
    pub fn prev_tab(&mut self) {
        let prev = if self.active == 0 {
            self.tabs.len() - 1
        } else {
            self.active - 1
        };
        self.select(prev);
    }

    // ==================== File operations ====================

    /// Prompts for a file and opens it in a new tab.
    ///
    /// Returns `Ok(None)` when the prompt is cancelled.
    pub fn open_with(&mut self, chooser: &mut dyn FileChooser) -> CoreResult<Option<TabId>> {
        match chooser.pick_open() {
            Some(path) => self.open_path(path).map(Some),
            None => Ok(None),
        }
    }

    /// Opens `path` in a new tab.
    ///
    /// The tab is created before the read. If the read fails it stays open,
    /// empty and unbound, unless the host was built with
    /// `keep_tab_on_failed_open(false)`.
    pub fn open_path(&mut self, path: impl AsRef<Path>) -> CoreResult<TabId> {
        let path = path.as_ref();
        let previous = self.active;
        let id = self.new_tab();

        match std::fs::read_to_string(path) {
            Ok(text) => {
                let index = self.active;
                let tab = &mut self.tabs[index];
                tab.widget_mut().set_text(&text);
                tab.bind_path(path);
                tracing::info!("Opened {}", path.display());
                self.events.emit(TabEvent::FileOpened {
                    id,
                    path: path.to_path_buf(),
                });
                Ok(id)
            }
            Err(source) => {
                tracing::warn!("Failed to open {}: {}", path.display(), source);
                if !self.keep_tab_on_failed_open {
                    let index = self.active;
                    self.remove(index);
                    self.active = previous.min(self.tabs.len() - 1);
                    self.events.emit(TabEvent::TabClosed { id });
                }
                Err(CoreError::FileRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    /// Saves the active tab to its bound path, or prompts like Save-As
    /// when it has none.
    pub fn save_with(&mut self, chooser: &mut dyn FileChooser) -> CoreResult<SaveOutcome> {
        let Some(tab) = self.active() else {
            return Ok(SaveOutcome::Cancelled);
        };
        let Some(path) = tab.path().map(Path::to_path_buf) else {
            return self.save_as_with(chooser);
        };

        let id = tab.id();
        write_text(&path, &tab.widget().text())?;
        tracing::info!("Saved {}", path.display());
        self.events.emit(TabEvent::FileSaved {
            id,
            path: path.clone(),
        });
        Ok(SaveOutcome::Saved(path))
    }

    /// Prompts for a destination and saves the active tab there.
    pub fn save_as_with(&mut self, chooser: &mut dyn FileChooser) -> CoreResult<SaveOutcome> {
        let Some(tab) = self.active() else {
            return Ok(SaveOutcome::Cancelled);
        };
        match chooser.pick_save(tab.title()) {
            Some(path) => self.save_as_path(path),
            None => Ok(SaveOutcome::Cancelled),
        }
    }

    /// Writes the active tab to `path` and binds it there.
    ///
    /// On failure the previous binding and title are left untouched. With no
    /// active tab nothing is written and the request counts as cancelled.
    pub fn save_as_path(&mut self, path: impl Into<PathBuf>) -> CoreResult<SaveOutcome> {
        let path = path.into();
        let index = self.active;
        let Some(tab) = self.tabs.get_mut(index) else {
            return Ok(SaveOutcome::Cancelled);
        };

        write_text(&path, &tab.widget().text())?;
        tab.bind_path(&path);
        tracing::info!("Saved as {} ({})", path.display(), display_name(&path));
        let id = tab.id();
        self.events.emit(TabEvent::FileSavedAs {
            id,
            path: path.clone(),
        });
        Ok(SaveOutcome::Saved(path))
    }

    fn remove(&mut self, index: usize) -> TabId {
        let tab = self.tabs.remove(index);
        if self.active >= self.tabs.len() {
            self.active = self.tabs.len() - 1;
        } else if index < self.active {
            self.active -= 1;
        }
        tab.id()
    }
}

fn write_text(path: &Path, text: &str) -> CoreResult<()> {
    std::fs::write(path, text).map_err(|source| {
        tracing::warn!("Failed to save {}: {}", path.display(), source);
        CoreError::FileWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}
