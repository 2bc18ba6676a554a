// Editor-pane rendering.
// - Renders the active tab's buffer with a visible cursor cell.
// - Keeps the cursor row inside the viewport as the buffer scrolls.
// - Shows a short hint when no tab is open.
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::{App, Tab, byte_index_for_char},
    model::Focus,
};

use super::pane_border_style;

pub fn render_editor_pane(frame: &mut Frame, app: &App, focus: Focus, area: Rect) {
    let focused = focus == Focus::Editor;
    let title = match app.active_tab() {
        Some(tab) => format!("Editor: {}{}", tab.title, if tab.modified { "*" } else { "" }),
        None => "Editor".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border_style(focused, Color::Cyan))
        .title(title);
    let inner = block.inner(area);
    let visible_rows = inner.height.max(1) as usize;
    app.set_editor_visible_rows(visible_rows);

    let Some(tab) = app.active_tab() else {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from("No open tabs.").alignment(Alignment::Center),
            Line::from(""),
            Line::from("Ctrl+N opens a new file.").alignment(Alignment::Center),
            Line::from("Ctrl+H focuses the file browser.").alignment(Alignment::Center),
        ])
        .block(block);
        frame.render_widget(hint, area);
        return;
    };

    tab.clamp_scroll_for_cursor(visible_rows);
    let top = tab.scroll_top.get();

    let lines = tab
        .lines
        .iter()
        .enumerate()
        .skip(top)
        .take(visible_rows)
        .map(|(index, line)| {
            if focused && index == tab.cursor_line {
                cursor_line_spans(tab, line)
            } else {
                Line::from(line.as_str())
            }
        })
        .collect::<Vec<_>>();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn cursor_line_spans<'a>(tab: &Tab, line: &'a str) -> Line<'a> {
    let split = byte_index_for_char(line, tab.cursor_col);
    let (before, rest) = line.split_at(split);
    let mut rest_chars = rest.chars();
    let cursor_char = rest_chars.next();
    let after = rest_chars.as_str();

    let cursor_span = Span::styled(
        cursor_char.map_or_else(|| " ".to_string(), |ch| ch.to_string()),
        Style::default().add_modifier(Modifier::REVERSED),
    );

    Line::from(vec![Span::raw(before), cursor_span, Span::raw(after)])
}
