// Terminal entry point and event loop.
// - Sets up and restores the terminal around the app run loop.
// - Polls key events, advances background work, and redraws each frame.
// - Routes keys to modal handlers first, then global and focus-local commands.
mod app;
mod engine;
mod model;
mod ui;

use std::{env, io, path::PathBuf, time::Duration};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{app::App, model::Focus};

fn main() -> io::Result<()> {
    let start_dir = env::args().nth(1).map(PathBuf::from);
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, start_dir);
    ratatui::restore();
    result
}

fn run(terminal: &mut ratatui::DefaultTerminal, start_dir: Option<PathBuf>) -> io::Result<()> {
    let mut app = App::new(start_dir)?;
    let mut focus = Focus::Editor;

    loop {
        app.tick();
        terminal.draw(|frame| ui::render(frame, &app, focus))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && handle_key(&mut app, &mut focus, key)? == Flow::Quit
        {
            break Ok(());
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_key(app: &mut App, focus: &mut Focus, key: KeyEvent) -> io::Result<Flow> {
    // Modal surfaces swallow all input until resolved.
    if app.error_dialog.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_error_dialog();
        }
        return Ok(Flow::Continue);
    }

    if app.has_pending_close() {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => {
                if app.confirm_pending_close() {
                    return Ok(Flow::Quit);
                }
            }
            KeyCode::Esc | KeyCode::Char('n') => app.cancel_pending_close(),
            _ => {}
        }
        return Ok(Flow::Continue);
    }

    if app.save_as_prompt.is_some() {
        handle_save_as_prompt_key(app, key);
        return Ok(Flow::Continue);
    }

    if app.show_keybinds {
        if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
            app.hide_keybinds();
        }
        return Ok(Flow::Continue);
    }

    if key.code == KeyCode::F(1) {
        app.toggle_keybinds();
        return Ok(Flow::Continue);
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => {
                if app.request_quit() {
                    return Ok(Flow::Quit);
                }
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::SHIFT) => {
                app.open_save_as_prompt();
            }
            KeyCode::Char('S') => app.open_save_as_prompt(),
            KeyCode::Char('s') => {
                app.save_active_tab();
            }
            KeyCode::Char('e') => app.run_active_script(),
            KeyCode::Char('n') => {
                app.new_tab();
                *focus = Focus::Editor;
            }
            KeyCode::Char('w') => app.request_close_active_tab(),
            KeyCode::Char('h') | KeyCode::Left => *focus = Focus::Browser,
            KeyCode::Char('l') | KeyCode::Right => *focus = Focus::Editor,
            KeyCode::Char('o') => *focus = Focus::Console,
            KeyCode::Char('j') | KeyCode::Down => *focus = focus.next_window(),
            KeyCode::Char('k') | KeyCode::Up => *focus = focus.previous_window(),
            _ => {}
        }
        return Ok(Flow::Continue);
    }

    if key.modifiers.contains(KeyModifiers::ALT) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => app.select_previous_tab(),
            KeyCode::Right | KeyCode::Char('l') => app.select_next_tab(),
            KeyCode::Char(ch @ '1'..='9') => {
                let number = ch.to_digit(10).unwrap_or(0) as usize;
                app.select_tab_by_number(number);
            }
            _ => {}
        }
        return Ok(Flow::Continue);
    }

    match focus {
        Focus::Browser => handle_browser_key(app, focus, key)?,
        Focus::Editor => handle_editor_key(app, focus, key),
        Focus::Console => handle_console_key(app, focus, key),
    }

    Ok(Flow::Continue)
}

fn handle_save_as_prompt_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.commit_save_as_prompt();
        }
        KeyCode::Esc => app.cancel_save_as_prompt(),
        KeyCode::Backspace => app.prompt_backspace(),
        KeyCode::Left => app.prompt_move_left(),
        KeyCode::Right => app.prompt_move_right(),
        KeyCode::Char(ch) => app.prompt_insert_char(ch),
        _ => {}
    }
}

fn handle_browser_key(app: &mut App, focus: &mut Focus, key: KeyEvent) -> io::Result<()> {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.next(),
        KeyCode::Up | KeyCode::Char('k') => app.previous(),
        KeyCode::PageDown => app.page_files_down(),
        KeyCode::PageUp => app.page_files_up(),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
            if app.activate_selected_entry()? {
                *focus = Focus::Editor;
            }
        }
        KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => {
            app.go_parent_dir()?;
        }
        KeyCode::Char('_') => app.go_initial_dir()?,
        KeyCode::Char('r') => app.reload()?,
        KeyCode::Char('?') => app.toggle_keybinds(),
        KeyCode::Esc => *focus = Focus::Editor,
        _ => {}
    }
    Ok(())
}

fn handle_editor_key(app: &mut App, focus: &mut Focus, key: KeyEvent) {
    match key.code {
        KeyCode::Char(ch) => app.insert_char(ch),
        KeyCode::Enter => app.insert_newline(),
        KeyCode::Tab => app.insert_indent(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete_forward(),
        KeyCode::Left => app.move_cursor_left(),
        KeyCode::Right => app.move_cursor_right(),
        KeyCode::Up => app.move_cursor_up(),
        KeyCode::Down => app.move_cursor_down(),
        KeyCode::Home => app.move_cursor_home(),
        KeyCode::End => app.move_cursor_end(),
        KeyCode::PageUp => app.editor_page_up(),
        KeyCode::PageDown => app.editor_page_down(),
        KeyCode::Esc => *focus = Focus::Browser,
        _ => {}
    }
}

fn handle_console_key(app: &mut App, focus: &mut Focus, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_console_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_console_up(),
        KeyCode::PageDown => app.page_console_down(),
        KeyCode::PageUp => app.page_console_up(),
        KeyCode::Esc => *focus = Focus::Editor,
        _ => {}
    }
}
