//! Native file dialogs for open and save.

use std::path::{Path, PathBuf};

use rfd::FileDialog;

use jsedit_host::PathPrompt;

/// Shows a blocking native dialog on the UI thread.
#[derive(Debug, Default)]
pub struct DialogPrompt;

impl DialogPrompt {
    fn dialog() -> FileDialog {
        FileDialog::new()
            .add_filter("JSON", &["json"])
            .add_filter("All files", &["*"])
    }
}

impl PathPrompt for DialogPrompt {
    fn pick_open(&mut self) -> Option<PathBuf> {
        Self::dialog().set_title("Open").pick_file()
    }

    fn pick_save(&mut self, current: Option<&Path>) -> Option<PathBuf> {
        let mut dialog = Self::dialog().set_title("Save As");
        if let Some(current) = current {
            if let Some(dir) = current.parent() {
                dialog = dialog.set_directory(dir);
            }
            if let Some(name) = current.file_name() {
                dialog = dialog.set_file_name(name.to_string_lossy());
            }
        }
        dialog.save_file()
    }
}
