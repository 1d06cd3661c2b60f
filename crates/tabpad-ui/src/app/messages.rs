use iced::keyboard;
use iced::widget::text_editor;
use tabpad_core::Command;

#[derive(Debug, Clone)]
pub enum Message {
    /// A menu item or shortcut fired
    Command(Command),

    // Editor
    EditorAction(text_editor::Action),
    EditorScrolled { offset: f32, height: f32 },

    // Tabs
    TabSelected(usize),
    CloseTab(usize),

    // Top menu bar
    ToggleTopMenu(usize),
    CloseTopMenu,
    MenuHovered(Command),

    // Help
    HideAbout,

    KeyPressed(keyboard::Key, keyboard::Modifiers),
}

impl From<Command> for Message {
    fn from(cmd: Command) -> Self {
        Message::Command(cmd)
    }
}
