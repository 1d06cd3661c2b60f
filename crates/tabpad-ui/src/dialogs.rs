//! Native file dialogs.

use std::path::PathBuf;
use tabpad_core::FileChooser;
use tabpad_core::config::FileFilter;

/// Blocking `rfd` dialogs offering the configured filters.
pub struct NativeChooser<'a> {
    filters: &'a [FileFilter],
}

impl<'a> NativeChooser<'a> {
    pub fn new(filters: &'a [FileFilter]) -> Self {
        Self { filters }
    }

    fn dialog(&self) -> rfd::FileDialog {
        self.filters
            .iter()
            .fold(rfd::FileDialog::new(), |dialog, filter| {
                dialog.add_filter(filter.name.as_str(), filter.extensions.as_slice())
            })
    }
}

impl FileChooser for NativeChooser<'_> {
    fn pick_open(&mut self) -> Option<PathBuf> {
        let picked = self.dialog().set_title("Open File").pick_file();
        tracing::debug!(?picked, "open dialog closed");
        picked
    }

    fn pick_save(&mut self, suggested_name: &str) -> Option<PathBuf> {
        let picked = self
            .dialog()
            .set_title("Save File")
            .set_file_name(suggested_name)
            .save_file();
        tracing::debug!(?picked, "save dialog closed");
        picked
    }
}
