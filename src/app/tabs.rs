// Document-tab management.
// - Defines the per-tab record: buffer lines, cursor, console, path, title.
// - Creates, selects, and closes tabs, keeping the active index in range.
// - Derives display titles from backing file paths.
use std::{
    cell::Cell,
    path::{Path, PathBuf},
};

use super::{App, PendingClose, console::ConsoleOutput};

pub(crate) const UNTITLED: &str = "Untitled";

pub(crate) struct Tab {
    pub(crate) id: u64,
    pub(crate) lines: Vec<String>,
    pub(crate) cursor_line: usize,
    pub(crate) cursor_col: usize,
    pub(crate) scroll_top: Cell<usize>,
    pub(crate) path: Option<PathBuf>,
    pub(crate) title: String,
    pub(crate) modified: bool,
    pub(crate) console: ConsoleOutput,
}

impl Tab {
    fn empty(id: u64) -> Self {
        Self {
            id,
            lines: vec![String::new()],
            cursor_line: 0,
            cursor_col: 0,
            scroll_top: Cell::new(0),
            path: None,
            title: UNTITLED.to_string(),
            modified: false,
            console: ConsoleOutput::empty(),
        }
    }

    fn from_content(id: u64, path: PathBuf, content: &str) -> Self {
        let title = display_base_name(&path);
        Self {
            id,
            lines: content.split('\n').map(str::to_string).collect(),
            cursor_line: 0,
            cursor_col: 0,
            scroll_top: Cell::new(0),
            path: Some(path),
            title,
            modified: false,
            console: ConsoleOutput::empty(),
        }
    }

    /// Joining the line vector with '\n' reproduces the buffer content
    /// byte-for-byte, including any trailing newline.
    pub(crate) fn content(&self) -> String {
        self.lines.join("\n")
    }

    pub(crate) fn set_title_from_path(&mut self) {
        if let Some(path) = &self.path {
            self.title = display_base_name(path);
        }
    }
}

impl App {
    pub fn new_tab(&mut self) {
        let tab = Tab::empty(self.take_tab_id());
        self.tabs.push(tab);
        self.active_tab = self.tabs.len() - 1;
    }

    pub(crate) fn open_content_in_new_tab(&mut self, path: PathBuf, content: &str) {
        self.status_message = format!("Opened {}", path.display());
        let tab = Tab::from_content(self.take_tab_id(), path, content);
        self.tabs.push(tab);
        self.active_tab = self.tabs.len() - 1;
    }

    pub(crate) fn active_tab(&self) -> Option<&Tab> {
        self.tabs.get(self.active_tab)
    }

    pub(crate) fn active_tab_mut(&mut self) -> Option<&mut Tab> {
        self.tabs.get_mut(self.active_tab)
    }

    pub fn select_next_tab(&mut self) {
        if self.tabs.len() > 1 {
            self.active_tab = (self.active_tab + 1) % self.tabs.len();
        }
    }

    pub fn select_previous_tab(&mut self) {
        if self.tabs.len() > 1 {
            self.active_tab = if self.active_tab == 0 {
                self.tabs.len() - 1
            } else {
                self.active_tab - 1
            };
        }
    }

    pub fn select_tab_by_number(&mut self, number: usize) -> bool {
        if number == 0 || number > self.tabs.len() {
            return false;
        }
        self.active_tab = number - 1;
        true
    }

    pub fn request_close_active_tab(&mut self) {
        let Some(tab) = self.active_tab() else {
            self.status_message = "No open tabs.".to_string();
            return;
        };

        if tab.modified {
            self.pending_close = Some(PendingClose::Tab);
        } else {
            self.close_active_tab();
        }
    }

    pub(crate) fn close_active_tab(&mut self) {
        if self.tabs.is_empty() {
            return;
        }

        let tab = self.tabs.remove(self.active_tab);
        self.active_tab = self.active_tab.min(self.tabs.len().saturating_sub(1));
        self.status_message = format!("Closed tab: {}", tab.title);
    }

    fn take_tab_id(&mut self) -> u64 {
        let id = self.next_tab_id;
        self.next_tab_id += 1;
        id
    }
}

pub(crate) fn display_base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
