use iced::widget::scrollable;
use iced::{keyboard, Subscription, Task};
use std::path::PathBuf;
use tokio::sync::broadcast;

use tabpad_core::{CommandRegistry, Config, Keymap, LineNumberGutter, TabEvent, TabHost};

use crate::style::EditorStyle;
use crate::widget::EditorWidget;

pub mod messages;
pub mod update;
pub mod view;

pub use messages::*;

/// Launch options gathered by the binary.
#[derive(Debug, Default)]
pub struct Flags {
    /// Files to open in tabs at startup
    pub files: Vec<PathBuf>,
    pub config: Config,
}

pub struct App {
    pub host: TabHost<EditorWidget>,
    pub events: broadcast::Receiver<TabEvent>,
    pub config: Config,
    pub registry: CommandRegistry,
    pub keymap: Keymap,
    /// `None` when line numbers are turned off
    pub gutter: Option<LineNumberGutter>,
    pub style: EditorStyle,
    pub status_message: String,
    pub active_menu: Option<usize>,
    pub about_visible: bool,
    pub viewport_height: f32,
    pub editor_scroll_id: scrollable::Id,
}

impl App {
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let Flags { files, config } = flags;

        let host = TabHost::new(EditorWidget::new)
            .keep_tab_on_failed_open(config.files.keep_tab_on_failed_open);
        let events = host.subscribe();
        let registry = CommandRegistry::new();
        let keymap = Keymap::from_config(&config.keyboard, &registry);
        let gutter = config
            .ui
            .line_numbers
            .then(|| LineNumberGutter::new(config.gutter));

        let mut app = Self {
            host,
            events,
            style: EditorStyle::from_config(&config.ui),
            config,
            registry,
            keymap,
            gutter,
            status_message: "Ready".to_string(),
            active_menu: None,
            about_visible: false,
            viewport_height: 0.0,
            editor_scroll_id: scrollable::Id::unique(),
        };

        for path in &files {
            app.open_path(path);
        }

        (app, Task::none())
    }

    pub fn title(&self) -> String {
        self.host.window_title(&self.config.ui.app_name)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, modifiers| Some(Message::KeyPressed(key, modifiers)))
    }
}

pub fn run(flags: Flags) -> iced::Result {
    let size = iced::Size::new(
        flags.config.ui.window_width,
        flags.config.ui.window_height,
    );

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .window_size(size)
        .theme(|_| crate::theme::iced_theme())
        .antialiasing(true)
        .run_with(move || App::new(flags))
}
