// Central application state shared by the app submodules.
// - Stores the tab list, file-browser state, and modal/prompt state.
// - Owns the single running-script handle and pumps its result channel.
// - Exposes cross-cutting helpers used by event handling and rendering code.
mod console;
mod editor;
mod execute;
mod files;
mod save;
mod tabs;

use std::{cell::Cell, env, fs, io, path::PathBuf};

use crate::model::FileEntry;

use self::execute::RunningScript;
use self::files::read_entries;
pub(crate) use self::editor::byte_index_for_char;
pub(crate) use self::files::is_javascript_file;
pub(crate) use self::save::SaveAsPrompt;
pub(crate) use self::tabs::Tab;

pub struct App {
    pub(crate) cwd: PathBuf,
    initial_dir: PathBuf,
    pub(crate) entries: Vec<FileEntry>,
    pub(crate) selected: usize,
    pub(crate) tabs: Vec<Tab>,
    pub(crate) active_tab: usize,
    next_tab_id: u64,
    pub(crate) status_message: String,
    pub(crate) show_keybinds: bool,
    pub(crate) spinner_frame: usize,
    pub(crate) error_dialog: Option<ErrorDialog>,
    pub(crate) save_as_prompt: Option<SaveAsPrompt>,
    pending_close: Option<PendingClose>,
    running_script: Option<RunningScript>,
    file_browser_visible_rows: Cell<usize>,
    editor_visible_rows: Cell<usize>,
}

pub(crate) struct ErrorDialog {
    pub(crate) title: &'static str,
    pub(crate) message: String,
}

impl ErrorDialog {
    pub(crate) fn error(message: String) -> Self {
        Self {
            title: "Error",
            message,
        }
    }

    pub(crate) fn warning(message: String) -> Self {
        Self {
            title: "Warning",
            message,
        }
    }
}

enum PendingClose {
    Tab,
    Quit,
}

impl App {
    pub fn new(start_dir: Option<PathBuf>) -> io::Result<Self> {
        let cwd = resolve_start_dir(start_dir)?;
        let entries = read_entries(&cwd)?;

        let mut app = Self {
            cwd: cwd.clone(),
            initial_dir: cwd,
            entries,
            selected: 0,
            tabs: Vec::new(),
            active_tab: 0,
            next_tab_id: 0,
            status_message: "Ready. Press F1 for keyboard shortcuts.".to_string(),
            show_keybinds: false,
            spinner_frame: 0,
            error_dialog: None,
            save_as_prompt: None,
            pending_close: None,
            running_script: None,
            file_browser_visible_rows: Cell::new(0),
            editor_visible_rows: Cell::new(0),
        };
        app.new_tab();

        Ok(app)
    }

    pub fn tick(&mut self) {
        if self.script_running() {
            self.spinner_frame = (self.spinner_frame + 1) % spinner_frames().len();
            self.pump_running_script();
        }
    }

    pub fn toggle_keybinds(&mut self) {
        self.show_keybinds = !self.show_keybinds;
    }

    pub fn hide_keybinds(&mut self) {
        self.show_keybinds = false;
    }

    pub fn dismiss_error_dialog(&mut self) {
        self.error_dialog = None;
    }

    /// Returns true when the app may quit immediately; otherwise arms the
    /// discard-changes confirmation covering the modified tabs.
    pub fn request_quit(&mut self) -> bool {
        if self.tabs.iter().any(|tab| tab.modified) {
            self.pending_close = Some(PendingClose::Quit);
            false
        } else {
            true
        }
    }

    pub fn has_pending_close(&self) -> bool {
        self.pending_close.is_some()
    }

    pub fn pending_close_label(&self) -> Option<&'static str> {
        match self.pending_close {
            Some(PendingClose::Tab) => Some("Close this tab"),
            Some(PendingClose::Quit) => Some("Quit zenjs"),
            None => None,
        }
    }

    pub fn cancel_pending_close(&mut self) {
        self.pending_close = None;
    }

    /// Returns true when the confirmed action is quitting the app.
    pub fn confirm_pending_close(&mut self) -> bool {
        match self.pending_close.take() {
            Some(PendingClose::Tab) => {
                self.close_active_tab();
                false
            }
            Some(PendingClose::Quit) => true,
            None => false,
        }
    }

    pub(crate) fn set_file_browser_visible_rows(&self, rows: usize) {
        self.file_browser_visible_rows.set(rows);
    }

    pub(crate) fn file_browser_page_step(&self) -> usize {
        self.file_browser_visible_rows.get().saturating_sub(1).max(1)
    }

    pub(crate) fn set_editor_visible_rows(&self, rows: usize) {
        self.editor_visible_rows.set(rows);
    }

    pub(crate) fn editor_page_step(&self) -> usize {
        self.editor_visible_rows.get().saturating_sub(1).max(1)
    }
}

fn resolve_start_dir(start_dir: Option<PathBuf>) -> io::Result<PathBuf> {
    let Some(path) = start_dir else {
        return env::current_dir();
    };

    let absolute = if path.is_absolute() {
        path
    } else {
        env::current_dir()?.join(path)
    };

    let metadata = fs::metadata(&absolute).map_err(|err| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Invalid start directory '{}': {err}", absolute.display()),
        )
    })?;
    if !metadata.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Start path is not a directory: {}", absolute.display()),
        ));
    }

    Ok(absolute)
}

pub(crate) fn spinner_frames() -> &'static [char] {
    &['|', '/', '-', '\\']
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::App;

    #[test]
    fn rejects_a_file_as_start_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not_a_dir");
        std::fs::write(&file, "x").unwrap();

        assert!(App::new(Some(file)).is_err());
    }

    #[test]
    fn quit_is_immediate_with_no_unsaved_changes() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(Some(dir.path().to_path_buf())).unwrap();

        assert!(app.request_quit());
        assert!(!app.has_pending_close());
    }

    #[test]
    fn quit_with_unsaved_changes_needs_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(Some(dir.path().to_path_buf())).unwrap();
        app.insert_char('x');

        assert!(!app.request_quit());
        assert!(app.has_pending_close());
        assert!(app.confirm_pending_close());
    }
}
