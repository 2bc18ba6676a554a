// Root UI composition and shared visual components.
// - Builds the global layout (left browser + tab strip + editor + console).
// - Renders shared chrome: status footer, keybinds popup, and modals.
// - Delegates pane-specific rendering to ui submodules.
mod console_panel;
mod editor_pane;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    app::{App, ErrorDialog, SaveAsPrompt, byte_index_for_char, is_javascript_file},
    model::{FileEntry, Focus},
};

pub fn render(frame: &mut Frame, app: &App, focus: Focus) {
    let [content, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(30), Constraint::Percentage(70)]).areas(content);
    let [strip_area, right_content] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(right);

    render_files_pane(frame, app, focus, left);
    render_tab_strip(frame, app, focus, strip_area);

    let pane_constraints = if focus == Focus::Console {
        [Constraint::Percentage(40), Constraint::Percentage(60)]
    } else {
        [Constraint::Min(0), Constraint::Length(10)]
    };
    let [editor_area, console_area] = Layout::vertical(pane_constraints).areas(right_content);

    editor_pane::render_editor_pane(frame, app, focus, editor_area);
    console_panel::render_console_pane(frame, app, focus, console_area);

    render_status_footer(frame, app, footer);

    if app.show_keybinds {
        render_keybinds_popup(frame);
    }
    if let Some(prompt) = &app.save_as_prompt {
        render_save_as_prompt(frame, prompt);
    }
    if app.has_pending_close() {
        render_close_confirm_modal(frame, app);
    }
    if let Some(dialog) = &app.error_dialog {
        render_error_dialog(frame, dialog);
    }
}

fn render_files_pane(frame: &mut Frame, app: &App, focus: Focus, area: Rect) {
    // Account for borders and highlight symbol so selected rows stay aligned.
    let content_width = area.width.saturating_sub(4) as usize;
    let file_items = app
        .entries
        .iter()
        .map(|entry| {
            let row = format_file_row(entry, content_width);
            if is_javascript_file(&entry.path) {
                ListItem::new(Line::styled(row, Style::default().fg(Color::LightGreen)))
            } else {
                ListItem::new(row)
            }
        })
        .collect::<Vec<_>>();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border_style(focus == Focus::Browser, Color::LightBlue))
        .title_top(Line::from(format!("Files: {}", app.cwd.display())).left_aligned())
        .title_top(Line::styled("(.js)", Style::default().fg(Color::DarkGray)).right_aligned());
    let inner = block.inner(area);
    let visible_rows = inner.height as usize;
    app.set_file_browser_visible_rows(visible_rows);

    let mut list_state = ListState::default();
    if !app.entries.is_empty() {
        let selected = app.selected.min(app.entries.len().saturating_sub(1));
        let centered_offset = if visible_rows == 0 {
            0
        } else {
            let max_offset = app.entries.len().saturating_sub(visible_rows);
            selected.saturating_sub(visible_rows / 2).min(max_offset)
        };
        list_state = list_state
            .with_offset(centered_offset)
            .with_selected(Some(selected));
    }

    let files = List::new(file_items)
        .block(block)
        .highlight_symbol("> ")
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));

    frame.render_stateful_widget(files, area, &mut list_state);
}

fn render_tab_strip(frame: &mut Frame, app: &App, focus: Focus, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title_top(Line::from("Tabs").left_aligned())
        .title_top(
            Line::styled("(alt+1..9)", Style::default().fg(Color::DarkGray)).right_aligned(),
        )
        .border_style(pane_border_style(focus != Focus::Browser, Color::Cyan));

    if app.tabs.is_empty() {
        let empty = Paragraph::new(Line::styled(
            "No open tabs",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let labels = app
        .tabs
        .iter()
        .enumerate()
        .map(|(index, tab)| {
            let marker = if tab.modified { "*" } else { "" };
            let label = truncate_to_width(&tab.title, 20);
            Line::from(format!(" {} {label}{marker} ", index + 1))
        })
        .collect::<Vec<_>>();

    let tabs = Tabs::new(labels)
        .select(app.active_tab)
        .divider(Span::styled("|", Style::default().fg(Color::DarkGray)))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(block);

    frame.render_widget(tabs, area);
}

fn render_status_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hint = Paragraph::new(Line::from(vec![
        Span::raw(app.status_message.as_str()),
        Span::styled("  (F1: keybinds)", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Left);
    frame.render_widget(hint, area);
}

fn render_keybinds_popup(frame: &mut Frame) {
    let popup = centered_popup(frame.area(), 70, 80);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("Press F1 or Esc to close this window."),
        Line::from(""),
        keybind_section("FILE"),
        keybind_row("Ctrl+N", "new file tab"),
        keybind_row("Ctrl+S", "save"),
        keybind_row("Ctrl+Shift+S", "save as (destination prompt)"),
        keybind_row("Ctrl+E", "execute file"),
        keybind_row("Ctrl+W", "close tab (confirm if unsaved)"),
        keybind_row("Ctrl+Q / Ctrl+C", "quit"),
        Line::from(""),
        keybind_section("WINDOW FOCUS"),
        keybind_row("Ctrl+H / Ctrl+Left", "focus file browser"),
        keybind_row("Ctrl+L / Ctrl+Right", "focus editor"),
        keybind_row("Ctrl+O", "focus console"),
        keybind_row("Ctrl+J/K", "cycle window focus"),
        Line::from(""),
        keybind_section("TABS"),
        keybind_row("Alt+Left/Right or Alt+H/L", "previous / next tab"),
        keybind_row("Alt+1..9", "select tab by number"),
        Line::from(""),
        keybind_section("FILE BROWSER"),
        keybind_row("j/k or Up/Down", "move selection"),
        keybind_row("Enter", "open directory or file"),
        keybind_row("h/-", "parent directory"),
        keybind_row("_", "initial directory"),
        keybind_row("r", "refresh listing"),
        Line::from(""),
        keybind_section("CONSOLE"),
        keybind_row("j/k or Up/Down", "scroll output"),
        keybind_row("PgUp/PgDn", "page output"),
    ];

    let popup_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Keybinds"))
        .alignment(Alignment::Left);

    frame.render_widget(popup_widget, popup);
}

fn render_save_as_prompt(frame: &mut Frame, prompt: &SaveAsPrompt) {
    let outer = frame.area();
    let [vertical] = Layout::vertical([Constraint::Length(4)])
        .flex(ratatui::layout::Flex::Center)
        .areas(outer);
    let [popup] = Layout::horizontal([Constraint::Percentage(60)])
        .flex(ratatui::layout::Flex::Center)
        .areas(vertical);

    frame.render_widget(Clear, popup);

    let split = byte_index_for_char(&prompt.input, prompt.cursor);
    let (before, rest) = prompt.input.split_at(split);
    let mut rest_chars = rest.chars();
    let cursor_char = rest_chars.next().unwrap_or(' ');
    let after = rest_chars.as_str();

    let lines = vec![
        Line::from(vec![
            Span::raw(before.to_string()),
            Span::styled(
                cursor_char.to_string(),
                Style::default().add_modifier(Modifier::REVERSED),
            ),
            Span::raw(after.to_string()),
        ]),
        Line::styled(
            "Enter saves, Esc cancels. A .js suffix is suggested, not required.",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let popup_widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Save As")
            .border_style(pane_border_style(true, Color::Cyan)),
    );

    frame.render_widget(popup_widget, popup);
}

fn render_close_confirm_modal(frame: &mut Frame, app: &App) {
    let Some(label) = app.pending_close_label() else {
        return;
    };

    let popup = centered_popup(frame.area(), 58, 38);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::styled(
            "Discard unsaved changes?",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Action: {label}")),
        Line::from(""),
        Line::from("Press y or Enter to confirm."),
        Line::from("Press n or Esc to cancel."),
    ];

    let popup_widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm")
                .border_style(pane_border_style(true, Color::LightRed)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    frame.render_widget(popup_widget, popup);
}

fn render_error_dialog(frame: &mut Frame, dialog: &ErrorDialog) {
    let popup = centered_popup(frame.area(), 58, 38);
    frame.render_widget(Clear, popup);

    let accent = if dialog.title == "Warning" {
        Color::Yellow
    } else {
        Color::LightRed
    };

    let mut lines = vec![Line::from("")];
    lines.extend(dialog.message.lines().map(|line| Line::from(line.to_string())));
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "Press Enter to dismiss.",
        Style::default().fg(Color::DarkGray),
    ));

    let popup_widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(dialog.title)
                .border_style(pane_border_style(true, accent)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    frame.render_widget(popup_widget, popup);
}

fn centered_popup(outer: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [vertical] = Layout::vertical([Constraint::Percentage(height_percent)])
        .flex(ratatui::layout::Flex::Center)
        .areas(outer);
    let [popup] = Layout::horizontal([Constraint::Percentage(width_percent)])
        .flex(ratatui::layout::Flex::Center)
        .areas(vertical);
    popup
}

fn keybind_section(title: &str) -> Line<'static> {
    Line::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn keybind_row(keys: &str, action: &str) -> Line<'static> {
    const KEY_COL_WIDTH: usize = 26;
    let keys_padded = format!("{keys:<KEY_COL_WIDTH$}");
    Line::from(vec![
        Span::styled(
            keys_padded,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(action.to_string()),
    ])
}

pub(super) fn pane_border_style(is_focused: bool, focused_color: Color) -> Style {
    if is_focused {
        Style::default()
            .fg(focused_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn format_file_row(entry: &FileEntry, content_width: usize) -> String {
    let size = file_size_label(entry);
    let size_len = display_width(&size);
    let available_name_width = content_width.saturating_sub(size_len + 1);
    let name = truncate_to_width(&entry.name, available_name_width);
    let name_len = display_width(&name);
    let spaces = content_width.saturating_sub(name_len + size_len).max(1);

    truncate_to_width(&format!("{name}{}{size}", " ".repeat(spaces)), content_width)
}

fn file_size_label(entry: &FileEntry) -> String {
    if entry.is_dir {
        "<DIR>".to_string()
    } else if let Some(bytes) = entry.size_bytes {
        format_size(bytes)
    } else {
        "?".to_string()
    }
}

fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    let bytes_f = bytes as f64;

    if bytes_f >= GB {
        format!("{:.1}G", bytes_f / GB)
    } else if bytes_f >= MB {
        format!("{:.1}M", bytes_f / MB)
    } else if bytes_f >= KB {
        format!("{:.1}K", bytes_f / KB)
    } else {
        format!("{bytes}B")
    }
}

fn display_width(value: &str) -> usize {
    UnicodeWidthStr::width(value)
}

fn truncate_to_width(value: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut width = 0;
    for ch in value.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if ch_width > 0 && width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}
