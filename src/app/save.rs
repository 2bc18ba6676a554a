// Save and Save As workflow.
// - Writes the active tab's buffer to its backing path verbatim.
// - Runs the destination-path prompt used when no path exists yet.
// - Raises a blocking error dialog on write failure, leaving state unchanged.
use std::{fs, path::PathBuf};

use super::{App, ErrorDialog, editor::byte_index_for_char};

pub(crate) struct SaveAsPrompt {
    pub(crate) input: String,
    pub(crate) cursor: usize,
}

impl App {
    /// Saves the active tab, delegating to the Save As prompt when it has no
    /// backing path yet. Returns true only when the buffer reached disk.
    pub fn save_active_tab(&mut self) -> bool {
        let Some(tab) = self.active_tab() else {
            self.status_message = "No open tabs.".to_string();
            return false;
        };

        let Some(path) = tab.path.clone() else {
            self.open_save_as_prompt();
            return false;
        };

        self.write_active_tab_to(path)
    }

    pub fn open_save_as_prompt(&mut self) {
        self.save_as_prompt = Some(SaveAsPrompt {
            input: String::new(),
            cursor: 0,
        });
    }

    pub fn cancel_save_as_prompt(&mut self) {
        self.save_as_prompt = None;
    }

    /// Commits the prompt: assigns the entered path to the active tab, then
    /// performs the save. Relative paths resolve against the browser cwd.
    pub fn commit_save_as_prompt(&mut self) -> bool {
        let Some(prompt) = self.save_as_prompt.take() else {
            return false;
        };

        let input = prompt.input.trim();
        if input.is_empty() {
            self.status_message = "Save As canceled: no destination path.".to_string();
            return false;
        }

        let path = PathBuf::from(input);
        let path = if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        };

        let Some(tab) = self.active_tab_mut() else {
            self.status_message = "No open tabs.".to_string();
            return false;
        };
        tab.path = Some(path.clone());

        self.write_active_tab_to(path)
    }

    pub fn prompt_insert_char(&mut self, ch: char) {
        if let Some(prompt) = self.save_as_prompt.as_mut() {
            let byte_index = byte_index_for_char(&prompt.input, prompt.cursor);
            prompt.input.insert(byte_index, ch);
            prompt.cursor += 1;
        }
    }

    pub fn prompt_backspace(&mut self) {
        if let Some(prompt) = self.save_as_prompt.as_mut()
            && prompt.cursor > 0
        {
            let start = byte_index_for_char(&prompt.input, prompt.cursor - 1);
            let end = byte_index_for_char(&prompt.input, prompt.cursor);
            prompt.input.replace_range(start..end, "");
            prompt.cursor -= 1;
        }
    }

    pub fn prompt_move_left(&mut self) {
        if let Some(prompt) = self.save_as_prompt.as_mut() {
            prompt.cursor = prompt.cursor.saturating_sub(1);
        }
    }

    pub fn prompt_move_right(&mut self) {
        if let Some(prompt) = self.save_as_prompt.as_mut() {
            prompt.cursor = (prompt.cursor + 1).min(prompt.input.chars().count());
        }
    }

    fn write_active_tab_to(&mut self, path: PathBuf) -> bool {
        let Some(tab) = self.active_tab_mut() else {
            return false;
        };

        match fs::write(&path, tab.content()) {
            Ok(()) => {
                tab.set_title_from_path();
                tab.modified = false;
                self.status_message = format!("Saved {}", path.display());
                if let Err(err) = self.refresh_file_browser_after_save(&path) {
                    self.status_message
                        .push_str(&format!(" (browser refresh failed: {err})"));
                }
                true
            }
            Err(err) => {
                self.error_dialog = Some(ErrorDialog::error(format!("Failed to save file: {err}")));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::app::App;

    fn app_in_temp_dir() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let app = App::new(Some(dir.path().to_path_buf())).unwrap();
        (dir, app)
    }

    fn type_into_prompt(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.prompt_insert_char(ch);
        }
    }

    #[test]
    fn save_without_a_path_opens_the_prompt() {
        let (_dir, mut app) = app_in_temp_dir();

        assert!(!app.save_active_tab());
        assert!(app.save_as_prompt.is_some());
    }

    #[test]
    fn save_as_then_save_round_trips_bytes_and_updates_the_title() {
        let (dir, mut app) = app_in_temp_dir();
        for ch in "let x = 1;".chars() {
            app.insert_char(ch);
        }

        app.open_save_as_prompt();
        type_into_prompt(&mut app, "script.js");
        assert!(app.commit_save_as_prompt());

        let path = dir.path().join("script.js");
        assert_eq!(fs::read_to_string(&path).unwrap(), "let x = 1;");

        let tab = app.active_tab().unwrap();
        assert_eq!(tab.title, "script.js");
        assert_eq!(tab.path.as_deref(), Some(path.as_path()));
        assert!(!tab.modified);

        app.insert_char('!');
        assert!(app.save_active_tab());
        assert_eq!(fs::read_to_string(&path).unwrap(), "let x = 1;!");
    }

    #[test]
    fn trailing_newline_survives_the_round_trip() {
        let (dir, mut app) = app_in_temp_dir();
        app.insert_char('a');
        app.insert_newline();

        app.open_save_as_prompt();
        type_into_prompt(&mut app, "a.js");
        assert!(app.commit_save_as_prompt());

        assert_eq!(fs::read_to_string(dir.path().join("a.js")).unwrap(), "a\n");
    }

    #[test]
    fn write_failure_raises_a_dialog_and_keeps_state() {
        let (_dir, mut app) = app_in_temp_dir();
        app.insert_char('x');

        app.open_save_as_prompt();
        type_into_prompt(&mut app, "missing_dir/a.js");
        assert!(!app.commit_save_as_prompt());

        assert!(app.error_dialog.is_some());
        let tab = app.active_tab().unwrap();
        assert!(tab.modified);
        assert_eq!(tab.content(), "x");
        assert_eq!(tab.title, "Untitled");
    }

    #[test]
    fn empty_prompt_input_cancels_without_assigning_a_path() {
        let (_dir, mut app) = app_in_temp_dir();
        app.open_save_as_prompt();
        type_into_prompt(&mut app, "   ");

        assert!(!app.commit_save_as_prompt());
        assert!(app.save_as_prompt.is_none());
        assert_eq!(app.active_tab().unwrap().path, None);
    }

    #[test]
    fn prompt_editing_respects_the_cursor() {
        let (_dir, mut app) = app_in_temp_dir();
        app.open_save_as_prompt();
        type_into_prompt(&mut app, "ab.js");
        app.prompt_move_left();
        app.prompt_move_left();
        app.prompt_move_left();
        app.prompt_backspace();
        app.prompt_insert_char('c');

        assert_eq!(app.save_as_prompt.as_ref().unwrap().input, "ac.js");
    }
}
