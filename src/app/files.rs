// File-browser behavior for the left pane.
// - Reads/sorts directory entries and manages selection movement.
// - Handles directory navigation and opening files into new tabs.
// - Highlights JavaScript-suffixed files as the suggested targets without
//   enforcing the suffix.
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::model::FileEntry;

use super::App;

impl App {
    pub fn next(&mut self) {
        if self.entries.is_empty() {
            self.selected = 0;
        } else {
            self.selected = (self.selected + 1).min(self.entries.len().saturating_sub(1));
        }
    }

    pub fn previous(&mut self) {
        if self.entries.is_empty() {
            self.selected = 0;
        } else {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    pub fn page_files_down(&mut self) {
        if self.entries.is_empty() {
            self.selected = 0;
            return;
        }

        let max_index = self.entries.len().saturating_sub(1);
        let step = self.file_browser_page_step();
        self.selected = (self.selected + step).min(max_index);
    }

    pub fn page_files_up(&mut self) {
        if self.entries.is_empty() {
            self.selected = 0;
            return;
        }

        let step = self.file_browser_page_step();
        self.selected = self.selected.saturating_sub(step);
    }

    pub fn reload(&mut self) -> io::Result<()> {
        self.entries = read_entries(&self.cwd)?;
        if self.entries.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.entries.len() {
            self.selected = self.entries.len() - 1;
        }
        Ok(())
    }

    /// Activates the selected entry: directories are entered, files are read
    /// into a fresh tab. Returns true when a file was opened so the caller
    /// can move focus to the editor.
    pub fn activate_selected_entry(&mut self) -> io::Result<bool> {
        let Some(entry) = self.selected_entry().cloned() else {
            return Ok(false);
        };

        if entry.is_dir {
            self.change_dir(entry.path)?;
            return Ok(false);
        }

        match fs::read_to_string(&entry.path) {
            Ok(content) => {
                self.open_content_in_new_tab(entry.path, &content);
                Ok(true)
            }
            Err(err) => {
                self.status_message = format!("Failed to open {}: {err}", entry.name);
                Ok(false)
            }
        }
    }

    pub fn go_parent_dir(&mut self) -> io::Result<()> {
        let Some(parent) = self.cwd.parent() else {
            return Ok(());
        };
        self.change_dir(parent.to_path_buf())
    }

    pub fn go_initial_dir(&mut self) -> io::Result<()> {
        self.change_dir(self.initial_dir.clone())
    }

    fn change_dir(&mut self, new_cwd: PathBuf) -> io::Result<()> {
        let entries = read_entries(&new_cwd)?;
        self.cwd = new_cwd;
        self.entries = entries;
        self.selected = 0;
        Ok(())
    }

    pub(super) fn refresh_file_browser_after_save(&mut self, saved_path: &Path) -> io::Result<()> {
        self.reload()?;

        let saved_dir = saved_path.parent().unwrap_or_else(|| Path::new("."));
        if saved_dir != self.cwd {
            return Ok(());
        }

        let Some(saved_name) = saved_path.file_name().and_then(|name| name.to_str()) else {
            return Ok(());
        };

        if let Some(index) = self
            .entries
            .iter()
            .position(|entry| entry.name == saved_name)
        {
            self.selected = index;
        }

        Ok(())
    }

    fn selected_entry(&self) -> Option<&FileEntry> {
        self.entries.get(self.selected)
    }
}

pub(super) fn read_entries(dir: &Path) -> io::Result<Vec<FileEntry>> {
    let mut entries = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
            let size_bytes = if is_dir {
                None
            } else {
                entry.metadata().ok().map(|meta| meta.len())
            };

            FileEntry {
                name,
                path,
                is_dir,
                size_bytes,
            }
        })
        .collect::<Vec<_>>();

    entries.sort_by_key(|entry| (!entry.is_dir, entry.name.to_ascii_lowercase()));
    Ok(entries)
}

pub(crate) fn is_javascript_file(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    matches!(ext.as_deref(), Some("js" | "mjs" | "cjs"))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::{is_javascript_file, read_entries};
    use crate::app::App;

    #[test]
    fn entries_sort_directories_first_then_case_insensitive() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Zeta.js"), "").unwrap();
        fs::write(dir.path().join("alpha.js"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let names = read_entries(dir.path())
            .unwrap()
            .into_iter()
            .map(|entry| entry.name)
            .collect::<Vec<_>>();

        assert_eq!(names, ["sub", "alpha.js", "Zeta.js"]);
    }

    #[test]
    fn javascript_suffixes_are_recognized() {
        assert!(is_javascript_file(Path::new("a.js")));
        assert!(is_javascript_file(Path::new("a.MJS")));
        assert!(is_javascript_file(Path::new("b.cjs")));
        assert!(!is_javascript_file(Path::new("a.rs")));
        assert!(!is_javascript_file(Path::new("js")));
    }

    #[test]
    fn opening_a_file_creates_a_populated_tab() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("hello.js"), "1 + 1").unwrap();

        let mut app = App::new(Some(dir.path().to_path_buf())).unwrap();
        let opened = app.activate_selected_entry().unwrap();

        assert!(opened);
        assert_eq!(app.tabs.len(), 2);
        let tab = app.active_tab().unwrap();
        assert_eq!(tab.title, "hello.js");
        assert_eq!(tab.content(), "1 + 1");
        assert_eq!(tab.path.as_deref(), Some(dir.path().join("hello.js").as_path()));
        assert!(!tab.modified);
    }

    #[test]
    fn opening_an_unreadable_file_reports_without_creating_a_tab() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("raw.bin"), [0xff, 0xfe, 0x00]).unwrap();

        let mut app = App::new(Some(dir.path().to_path_buf())).unwrap();
        let opened = app.activate_selected_entry().unwrap();

        assert!(!opened);
        assert_eq!(app.tabs.len(), 1);
        assert!(app.status_message.starts_with("Failed to open raw.bin"));
    }
}
