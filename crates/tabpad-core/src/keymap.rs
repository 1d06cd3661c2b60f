//! Keyboard mapping.
//!
//! Shortcuts are single key presses with modifiers; there are no modes and
//! no multi-key chords. User bindings from the config replace any default
//! bound to the same key.

use crate::command::{Command, CommandRegistry};
use crate::config::KeyboardConfig;
use std::collections::HashMap;

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool, // Cmd on macOS, Win on Windows
}

impl Modifiers {
    /// No modifiers pressed.
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Ctrl modifier.
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Ctrl+Shift.
    pub const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: true,
        meta: false,
    };

    /// Returns true if no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift && !self.meta
    }

    /// Parses modifiers from a string like "ctrl+shift".
    pub fn parse(s: &str) -> Self {
        let mut mods = Modifiers::NONE;
        for part in s.split('+').map(str::trim) {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => mods.ctrl = true,
                "alt" | "option" => mods.alt = true,
                "shift" => mods.shift = true,
                "meta" | "cmd" | "win" | "super" => mods.meta = true,
                _ => {}
            }
        }
        mods
    }
}

impl std::fmt::Display for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.shift {
            parts.push("Shift");
        }
        if self.meta {
            #[cfg(target_os = "macos")]
            parts.push("Cmd");
            #[cfg(not(target_os = "macos"))]
            parts.push("Win");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A key code. Characters are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Escape,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8), // F1-F12
    Space,
}

impl Key {
    /// Parses a key from a string.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "enter" | "return" => Some(Key::Enter),
            "tab" => Some(Key::Tab),
            "backspace" | "bs" => Some(Key::Backspace),
            "delete" | "del" => Some(Key::Delete),
            "escape" | "esc" => Some(Key::Escape),
            "home" => Some(Key::Home),
            "end" => Some(Key::End),
            "pageup" | "pgup" => Some(Key::PageUp),
            "pagedown" | "pgdn" => Some(Key::PageDown),
            "space" => Some(Key::Space),
            "plus" => Some(Key::Char('+')),
            _ if lower.starts_with('f') && lower.len() > 1 && lower.len() <= 3 => {
                lower[1..].parse().ok().map(Key::F)
            }
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c.to_uppercase()),
            Key::Enter => write!(f, "Enter"),
            Key::Tab => write!(f, "Tab"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Delete => write!(f, "Delete"),
            Key::Escape => write!(f, "Escape"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::PageUp => write!(f, "PageUp"),
            Key::PageDown => write!(f, "PageDown"),
            Key::F(n) => write!(f, "F{}", n),
            Key::Space => write!(f, "Space"),
        }
    }
}

/// A key press event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    /// Creates a new key press.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Parses a binding string like "ctrl+s", "Ctrl+Shift+Tab" or "ctrl++".
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        // A trailing "++" means the plus key itself.
        let (mod_str, key_str) = match s.strip_suffix("++") {
            Some(rest) => (rest, "+"),
            None => match s.rsplit_once('+') {
                Some((mods, key)) => (mods, key),
                None => ("", s),
            },
        };

        let key = Key::parse(key_str)?;
        let modifiers = Modifiers::parse(mod_str);
        Some(Self { key, modifiers })
    }
}

impl std::fmt::Display for KeyPress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.modifiers, self.key)
        }
    }
}

/// Maps key presses to commands.
pub struct Keymap {
    /// Bindings in insertion order, for shortcut display.
    bindings: Vec<(KeyPress, Command)>,
    /// Index by key for lookup.
    by_key: HashMap<KeyPress, usize>,
}

impl Keymap {
    /// Creates a keymap with the default bindings.
    pub fn new() -> Self {
        let mut keymap = Self {
            bindings: Vec::new(),
            by_key: HashMap::new(),
        };
        keymap.add_default_bindings();
        keymap.rebuild_index();
        keymap
    }

    /// Creates a keymap from configuration.
    ///
    /// Unparseable keys and unknown action names are logged and skipped.
    pub fn from_config(config: &KeyboardConfig, registry: &CommandRegistry) -> Self {
        let mut keymap = Self::new();

        // Sorted so overrides apply in a stable order.
        let mut pairs: Vec<_> = config.bindings.iter().collect();
        pairs.sort_unstable();

        for (key_str, action) in pairs {
            let Some(key) = KeyPress::parse(key_str) else {
                tracing::warn!("Ignoring binding with invalid key: {}", key_str);
                continue;
            };
            let Some(cmd) = registry.lookup(action) else {
                tracing::warn!("Ignoring binding to unknown action: {}", action);
                continue;
            };
            keymap.bind(key, cmd);
        }

        keymap
    }

    fn add_default_bindings(&mut self) {
        for cmd in Command::ALL {
            if let Some(key) = cmd.default_shortcut().and_then(KeyPress::parse) {
                self.bindings.push((key, cmd));
            }
        }
        // Second zoom-in key on the unshifted "=".
        self.bindings
            .push((KeyPress::new(Key::Char('='), Modifiers::CTRL), Command::ZoomIn));
    }

    fn rebuild_index(&mut self) {
        self.by_key.clear();
        for (i, (key, _)) in self.bindings.iter().enumerate() {
            self.by_key.insert(key.clone(), i);
        }
    }

    /// Binds `key` to `cmd`, replacing whatever the key did before.
    pub fn bind(&mut self, key: KeyPress, cmd: Command) {
        tracing::debug!("Binding {} to {}", key, cmd);
        self.bindings.retain(|(k, _)| *k != key);
        self.bindings.push((key, cmd));
        self.rebuild_index();
    }

    /// Looks up the command for a key press.
    ///
    /// Punctuation typed with shift (such as `+` on most layouts) also
    /// matches a binding written without shift.
    pub fn resolve(&self, key: &KeyPress) -> Option<Command> {
        if let Some(&i) = self.by_key.get(key) {
            return Some(self.bindings[i].1);
        }

        match &key.key {
            Key::Char(c) if key.modifiers.shift && !c.is_alphanumeric() => {
                let unshifted = KeyPress::new(
                    key.key.clone(),
                    Modifiers {
                        shift: false,
                        ..key.modifiers
                    },
                );
                self.by_key.get(&unshifted).map(|&i| self.bindings[i].1)
            }
            _ => None,
        }
    }

    /// Display text of the first key bound to `cmd`.
    pub fn shortcut_for(&self, cmd: Command) -> Option<String> {
        self.bindings
            .iter()
            .find(|(_, c)| *c == cmd)
            .map(|(key, _)| key.to_string())
    }

    /// Returns all bindings.
    pub fn bindings(&self) -> &[(KeyPress, Command)] {
        &self.bindings
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl(c: char) -> KeyPress {
        KeyPress::new(Key::Char(c), Modifiers::CTRL)
    }

    #[test]
    fn test_keypress_parse() {
        let kp = KeyPress::parse("ctrl+s").unwrap();
        assert_eq!(kp.key, Key::Char('s'));
        assert!(kp.modifiers.ctrl);

        let kp = KeyPress::parse("Ctrl+Shift+Tab").unwrap();
        assert_eq!(kp, KeyPress::new(Key::Tab, Modifiers::CTRL_SHIFT));

        assert_eq!(KeyPress::parse("Ctrl++"), Some(ctrl('+')));
        assert_eq!(KeyPress::parse("F5").map(|k| k.key), Some(Key::F(5)));
        assert_eq!(KeyPress::parse("ctrl+nope"), None);
    }

    #[test]
    fn test_keypress_display() {
        assert_eq!(KeyPress::parse("ctrl+shift+s").unwrap().to_string(), "Ctrl+Shift+S");
    }

    #[test]
    fn test_default_bindings_resolve() {
        let keymap = Keymap::new();
        assert_eq!(keymap.resolve(&ctrl('n')), Some(Command::NewTab));
        assert_eq!(keymap.resolve(&ctrl('s')), Some(Command::Save));
        assert_eq!(
            keymap.resolve(&KeyPress::new(Key::Char('s'), Modifiers::CTRL_SHIFT)),
            Some(Command::SaveAs)
        );
        assert_eq!(keymap.resolve(&ctrl('w')), Some(Command::CloseTab));
        assert_eq!(keymap.resolve(&ctrl('=')), Some(Command::ZoomIn));
        assert_eq!(keymap.resolve(&ctrl('0')), Some(Command::ZoomReset));
        assert_eq!(
            keymap.resolve(&KeyPress::new(Key::Tab, Modifiers::CTRL)),
            Some(Command::NextTab)
        );
        assert_eq!(keymap.resolve(&ctrl('k')), None);
    }

    #[test]
    fn test_shifted_plus_matches_zoom_in() {
        let keymap = Keymap::new();
        let typed = KeyPress::new(Key::Char('+'), Modifiers::CTRL_SHIFT);
        assert_eq!(keymap.resolve(&typed), Some(Command::ZoomIn));
    }

    #[test]
    fn test_user_binding_overrides_default() {
        let mut config = KeyboardConfig::default();
        config
            .bindings
            .insert("ctrl+s".to_string(), "help.about".to_string());
        config
            .bindings
            .insert("ctrl+k".to_string(), "file.save".to_string());
        config
            .bindings
            .insert("ctrl+j".to_string(), "no.such.action".to_string());

        let keymap = Keymap::from_config(&config, &CommandRegistry::new());
        assert_eq!(keymap.resolve(&ctrl('s')), Some(Command::About));
        assert_eq!(keymap.resolve(&ctrl('k')), Some(Command::Save));
        assert_eq!(keymap.resolve(&ctrl('j')), None);
        assert_eq!(keymap.shortcut_for(Command::Save).as_deref(), Some("Ctrl+K"));
    }

    #[test]
    fn test_shortcut_for_defaults() {
        let keymap = Keymap::new();
        assert_eq!(keymap.shortcut_for(Command::ZoomIn).as_deref(), Some("Ctrl++"));
        assert_eq!(keymap.shortcut_for(Command::About), None);
    }
}
