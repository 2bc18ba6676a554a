// Buffer editing for the active tab.
// - Inserts and deletes text at the cursor, splitting and joining lines.
// - Moves the cursor with column clamping on vertical motion.
// - Marks the owning tab modified on every mutation.
use super::{App, tabs::Tab};

const INDENT: &str = "    ";

impl App {
    pub fn insert_char(&mut self, ch: char) {
        if let Some(tab) = self.active_tab_mut() {
            tab.insert_char(ch);
        }
    }

    pub fn insert_newline(&mut self) {
        if let Some(tab) = self.active_tab_mut() {
            tab.insert_newline();
        }
    }

    pub fn insert_indent(&mut self) {
        if let Some(tab) = self.active_tab_mut() {
            for ch in INDENT.chars() {
                tab.insert_char(ch);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(tab) = self.active_tab_mut() {
            tab.backspace();
        }
    }

    pub fn delete_forward(&mut self) {
        if let Some(tab) = self.active_tab_mut() {
            tab.delete_forward();
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(tab) = self.active_tab_mut() {
            tab.move_left();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(tab) = self.active_tab_mut() {
            tab.move_right();
        }
    }

    pub fn move_cursor_up(&mut self) {
        if let Some(tab) = self.active_tab_mut() {
            tab.move_vertical(-1);
        }
    }

    pub fn move_cursor_down(&mut self) {
        if let Some(tab) = self.active_tab_mut() {
            tab.move_vertical(1);
        }
    }

    pub fn move_cursor_home(&mut self) {
        if let Some(tab) = self.active_tab_mut() {
            tab.cursor_col = 0;
        }
    }

    pub fn move_cursor_end(&mut self) {
        if let Some(tab) = self.active_tab_mut() {
            tab.cursor_col = tab.current_line_char_len();
        }
    }

    pub fn editor_page_up(&mut self) {
        let step = self.editor_page_step() as isize;
        if let Some(tab) = self.active_tab_mut() {
            tab.move_vertical(-step);
        }
    }

    pub fn editor_page_down(&mut self) {
        let step = self.editor_page_step() as isize;
        if let Some(tab) = self.active_tab_mut() {
            tab.move_vertical(step);
        }
    }
}

impl Tab {
    fn insert_char(&mut self, ch: char) {
        let col = self.cursor_col;
        let line = &mut self.lines[self.cursor_line];
        let byte_index = byte_index_for_char(line, col);
        line.insert(byte_index, ch);
        self.cursor_col += 1;
        self.modified = true;
    }

    fn insert_newline(&mut self) {
        let col = self.cursor_col;
        let line = &mut self.lines[self.cursor_line];
        let byte_index = byte_index_for_char(line, col);
        let rest = line.split_off(byte_index);
        self.lines.insert(self.cursor_line + 1, rest);
        self.cursor_line += 1;
        self.cursor_col = 0;
        self.modified = true;
    }

    fn backspace(&mut self) {
        if self.cursor_col > 0 {
            let col = self.cursor_col;
            let line = &mut self.lines[self.cursor_line];
            let start = byte_index_for_char(line, col - 1);
            let end = byte_index_for_char(line, col);
            line.replace_range(start..end, "");
            self.cursor_col -= 1;
            self.modified = true;
        } else if self.cursor_line > 0 {
            let removed = self.lines.remove(self.cursor_line);
            self.cursor_line -= 1;
            self.cursor_col = self.current_line_char_len();
            self.lines[self.cursor_line].push_str(&removed);
            self.modified = true;
        }
    }

    fn delete_forward(&mut self) {
        let col = self.cursor_col;
        if col < self.current_line_char_len() {
            let line = &mut self.lines[self.cursor_line];
            let start = byte_index_for_char(line, col);
            let end = byte_index_for_char(line, col + 1);
            line.replace_range(start..end, "");
            self.modified = true;
        } else if self.cursor_line + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_line + 1);
            self.lines[self.cursor_line].push_str(&next);
            self.modified = true;
        }
    }

    fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = self.current_line_char_len();
        }
    }

    fn move_right(&mut self) {
        if self.cursor_col < self.current_line_char_len() {
            self.cursor_col += 1;
        } else if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.cursor_col = 0;
        }
    }

    fn move_vertical(&mut self, delta: isize) {
        let max_line = self.lines.len().saturating_sub(1);
        let target = self.cursor_line.saturating_add_signed(delta).min(max_line);
        self.cursor_line = target;
        self.cursor_col = self.cursor_col.min(self.current_line_char_len());
    }

    pub(crate) fn current_line_char_len(&self) -> usize {
        self.lines[self.cursor_line].chars().count()
    }

    /// Adjusts the scroll offset so the cursor row stays inside a viewport of
    /// `visible_rows` lines. Called from the render path with the measured
    /// pane height.
    pub(crate) fn clamp_scroll_for_cursor(&self, visible_rows: usize) {
        let visible_rows = visible_rows.max(1);
        let mut top = self.scroll_top.get();

        if self.cursor_line < top {
            top = self.cursor_line;
        } else if self.cursor_line >= top + visible_rows {
            top = self.cursor_line + 1 - visible_rows;
        }

        let max_top = self.lines.len().saturating_sub(visible_rows);
        self.scroll_top.set(top.min(max_top));
    }
}

pub(crate) fn byte_index_for_char(input: &str, char_index: usize) -> usize {
    if char_index == 0 {
        return 0;
    }

    input
        .char_indices()
        .nth(char_index)
        .map(|(index, _)| index)
        .unwrap_or(input.len())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::app::App;

    fn app_with_tab() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let app = App::new(Some(dir.path().to_path_buf())).unwrap();
        (dir, app)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                app.insert_newline();
            } else {
                app.insert_char(ch);
            }
        }
    }

    #[test]
    fn typing_builds_the_expected_content() {
        let (_dir, mut app) = app_with_tab();
        type_text(&mut app, "let x = 1;\nx + 1");

        let tab = app.active_tab().unwrap();
        assert_eq!(tab.content(), "let x = 1;\nx + 1");
        assert!(tab.modified);
        assert_eq!((tab.cursor_line, tab.cursor_col), (1, 5));
    }

    #[test]
    fn trailing_newline_is_preserved_in_content() {
        let (_dir, mut app) = app_with_tab();
        type_text(&mut app, "a\n");

        assert_eq!(app.active_tab().unwrap().content(), "a\n");
    }

    #[test]
    fn backspace_joins_lines_at_line_start() {
        let (_dir, mut app) = app_with_tab();
        type_text(&mut app, "ab\ncd");
        app.move_cursor_home();
        app.backspace();

        let tab = app.active_tab().unwrap();
        assert_eq!(tab.content(), "abcd");
        assert_eq!((tab.cursor_line, tab.cursor_col), (0, 2));
    }

    #[test]
    fn delete_forward_joins_the_next_line_at_line_end() {
        let (_dir, mut app) = app_with_tab();
        type_text(&mut app, "ab\ncd");
        app.move_cursor_up();
        app.move_cursor_end();
        app.delete_forward();

        assert_eq!(app.active_tab().unwrap().content(), "abcd");
    }

    #[test]
    fn vertical_motion_clamps_the_column() {
        let (_dir, mut app) = app_with_tab();
        type_text(&mut app, "long line\nab");
        app.move_cursor_up();
        app.move_cursor_end();
        assert_eq!(app.active_tab().unwrap().cursor_col, 9);

        app.move_cursor_down();
        assert_eq!(app.active_tab().unwrap().cursor_col, 2);
    }

    #[test]
    fn multibyte_characters_edit_cleanly() {
        let (_dir, mut app) = app_with_tab();
        type_text(&mut app, "héllo");
        app.backspace();
        app.backspace();

        assert_eq!(app.active_tab().unwrap().content(), "hél");
    }
}
