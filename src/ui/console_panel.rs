// Console-pane rendering.
// - Renders the active tab's append-only output with tail-follow scrolling.
// - Shows a spinner in the title while a script is running.
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Color,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
    app::{App, spinner_frames},
    model::Focus,
};

use super::pane_border_style;

pub fn render_console_pane(frame: &mut Frame, app: &App, focus: Focus, area: Rect) {
    let title = if app.script_running() {
        format!("Console {}", spinner_frames()[app.spinner_frame])
    } else {
        "Console".to_string()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border_style(focus == Focus::Console, Color::Yellow))
        .title(title);
    let inner = block.inner(area);

    let Some(tab) = app.active_tab() else {
        frame.render_widget(block, area);
        return;
    };

    let scroll = tab
        .console
        .clamped_scroll_for_viewport(inner.height.max(1) as usize);
    let lines = tab
        .console
        .lines()
        .iter()
        .map(String::as_str)
        .map(Line::from)
        .collect::<Vec<_>>();

    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false })
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));

    frame.render_widget(widget, area);
}
