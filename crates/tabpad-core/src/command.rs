//! Command table and menu layout.
//!
//! ## Learning: The Command Pattern
//!
//! Every user action is a `Command` value. Menus, key bindings and the GUI
//! update loop all speak in commands, so the menu bar is built by reading a
//! table instead of wiring each item to a handler by hand.

use std::collections::HashMap;

/// Built-in commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // File
    NewTab,
    Open,
    Save,
    SaveAs,
    CloseTab,
    Exit,

    // Edit
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,

    // View
    ZoomIn,
    ZoomOut,
    ZoomReset,
    NextTab,
    PrevTab,

    // Help
    About,
}

impl Command {
    /// Every command, in menu order.
    pub const ALL: [Command; 18] = [
        Command::NewTab,
        Command::Open,
        Command::Save,
        Command::SaveAs,
        Command::CloseTab,
        Command::Exit,
        Command::Undo,
        Command::Redo,
        Command::Cut,
        Command::Copy,
        Command::Paste,
        Command::SelectAll,
        Command::ZoomIn,
        Command::ZoomOut,
        Command::ZoomReset,
        Command::NextTab,
        Command::PrevTab,
        Command::About,
    ];

    /// Stable action name used by the registry and by config key bindings.
    pub fn name(&self) -> &'static str {
        match self {
            Command::NewTab => "file.new",
            Command::Open => "file.open",
            Command::Save => "file.save",
            Command::SaveAs => "file.save_as",
            Command::CloseTab => "file.close_tab",
            Command::Exit => "file.exit",
            Command::Undo => "edit.undo",
            Command::Redo => "edit.redo",
            Command::Cut => "edit.cut",
            Command::Copy => "edit.copy",
            Command::Paste => "edit.paste",
            Command::SelectAll => "edit.select_all",
            Command::ZoomIn => "view.zoom_in",
            Command::ZoomOut => "view.zoom_out",
            Command::ZoomReset => "view.zoom_reset",
            Command::NextTab => "view.next_tab",
            Command::PrevTab => "view.prev_tab",
            Command::About => "help.about",
        }
    }

    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            Command::NewTab => "New",
            Command::Open => "Open...",
            Command::Save => "Save",
            Command::SaveAs => "Save As...",
            Command::CloseTab => "Close Tab",
            Command::Exit => "Exit",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::Cut => "Cut",
            Command::Copy => "Copy",
            Command::Paste => "Paste",
            Command::SelectAll => "Select All",
            Command::ZoomIn => "Zoom In",
            Command::ZoomOut => "Zoom Out",
            Command::ZoomReset => "Reset Zoom",
            Command::NextTab => "Next Tab",
            Command::PrevTab => "Previous Tab",
            Command::About => "About",
        }
    }

    /// Default shortcut, in the form `KeyPress::parse` accepts.
    pub fn default_shortcut(&self) -> Option<&'static str> {
        let shortcut = match self {
            Command::NewTab => "Ctrl+N",
            Command::Open => "Ctrl+O",
            Command::Save => "Ctrl+S",
            Command::SaveAs => "Ctrl+Shift+S",
            Command::CloseTab => "Ctrl+W",
            Command::Exit => "Ctrl+Q",
            Command::Undo => "Ctrl+Z",
            Command::Redo => "Ctrl+Y",
            Command::Cut => "Ctrl+X",
            Command::Copy => "Ctrl+C",
            Command::Paste => "Ctrl+V",
            Command::SelectAll => "Ctrl+A",
            Command::ZoomIn => "Ctrl++",
            Command::ZoomOut => "Ctrl+-",
            Command::ZoomReset => "Ctrl+0",
            Command::NextTab => "Ctrl+Tab",
            Command::PrevTab => "Ctrl+Shift+Tab",
            Command::About => return None,
        };
        Some(shortcut)
    }

    /// Status-bar hint shown while hovering the menu item.
    pub fn status_tip(&self) -> &'static str {
        match self {
            Command::NewTab => "Create a new document",
            Command::Open => "Open an existing document",
            Command::Save => "Save the current document",
            Command::SaveAs => "Save the current document with a new name",
            Command::CloseTab => "Close the current document",
            Command::Exit => "Exit the application",
            Command::Undo => "Undo the last action",
            Command::Redo => "Redo the last action",
            Command::Cut => "Cut the selected text",
            Command::Copy => "Copy the selected text",
            Command::Paste => "Paste text from clipboard",
            Command::SelectAll => "Select the whole document",
            Command::ZoomIn => "Zoom in",
            Command::ZoomOut => "Zoom out",
            Command::ZoomReset => "Restore the default font size",
            Command::NextTab => "Switch to the next tab",
            Command::PrevTab => "Switch to the previous tab",
            Command::About => "About this application",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of a dropdown menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Item(Command),
    Separator,
}

/// A top-level menu and its entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub title: &'static str,
    pub entries: Vec<MenuEntry>,
}

impl Menu {
    fn new(title: &'static str, entries: Vec<MenuEntry>) -> Self {
        Self { title, entries }
    }

    /// Commands in this menu, skipping separators.
    pub fn commands(&self) -> impl Iterator<Item = Command> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            MenuEntry::Item(cmd) => Some(*cmd),
            MenuEntry::Separator => None,
        })
    }
}

/// Dispatch table keyed by action name, plus the menu bar layout.
///
/// ## Learning: Table-Driven UI
///
/// The GUI never hardcodes a menu item. It walks `menus()` and turns each
/// `MenuEntry` into a button that emits the command, so adding a command
/// means adding one row here.
pub struct CommandRegistry {
    by_name: HashMap<&'static str, Command>,
    menus: Vec<Menu>,
}

impl CommandRegistry {
    /// Creates the registry with every built-in command.
    pub fn new() -> Self {
        use Command::*;
        use MenuEntry::{Item, Separator};

        let by_name = Command::ALL.iter().map(|cmd| (cmd.name(), *cmd)).collect();

        let menus = vec![
            Menu::new(
                "File",
                vec![
                    Item(NewTab),
                    Item(Open),
                    Item(Save),
                    Item(SaveAs),
                    Item(CloseTab),
                    Separator,
                    Item(Exit),
                ],
            ),
            Menu::new(
                "View",
                vec![
                    Item(ZoomIn),
                    Item(ZoomOut),
                    Item(ZoomReset),
                    Separator,
                    Item(NextTab),
                    Item(PrevTab),
                ],
            ),
            Menu::new(
                "Edit",
                vec![
                    Item(Undo),
                    Item(Redo),
                    Separator,
                    Item(Cut),
                    Item(Copy),
                    Item(Paste),
                    Separator,
                    Item(SelectAll),
                ],
            ),
            Menu::new("Help", vec![Item(About)]),
        ];

        Self { by_name, menus }
    }

    /// Resolves an action name such as `"file.save"`.
    pub fn lookup(&self, name: &str) -> Option<Command> {
        self.by_name.get(name).copied()
    }

    /// Menu bar layout, left to right.
    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    /// Finds a top-level menu by title.
    pub fn menu(&self, title: &str) -> Option<&Menu> {
        self.menus.iter().find(|m| m.title == title)
    }

    /// Returns all registered command names.
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.by_name.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_registry() {
        let registry = CommandRegistry::new();
        for cmd in Command::ALL {
            assert_eq!(registry.lookup(cmd.name()), Some(cmd));
        }
        assert_eq!(registry.lookup("file.frobnicate"), None);
        assert_eq!(registry.list().len(), Command::ALL.len());
    }

    #[test]
    fn test_every_command_appears_in_exactly_one_menu() {
        let registry = CommandRegistry::new();
        for cmd in Command::ALL {
            let count = registry
                .menus()
                .iter()
                .flat_map(Menu::commands)
                .filter(|c| *c == cmd)
                .count();
            assert_eq!(count, 1, "{cmd} should be in one menu");
        }
    }

    #[test]
    fn test_menu_layout() {
        let registry = CommandRegistry::new();
        let titles: Vec<_> = registry.menus().iter().map(|m| m.title).collect();
        assert_eq!(titles, ["File", "View", "Edit", "Help"]);

        let file = registry.menu("File").unwrap();
        assert_eq!(file.entries[5], MenuEntry::Separator);
        assert_eq!(file.entries.last(), Some(&MenuEntry::Item(Command::Exit)));
    }

    #[test]
    fn test_labels_and_tips() {
        assert_eq!(Command::SaveAs.label(), "Save As...");
        assert_eq!(Command::SaveAs.default_shortcut(), Some("Ctrl+Shift+S"));
        assert_eq!(Command::Paste.status_tip(), "Paste text from clipboard");
        assert_eq!(Command::About.default_shortcut(), None);
        assert_eq!(Command::Save.to_string(), "file.save");
    }
}
