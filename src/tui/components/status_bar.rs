// Status bar
//
// Bottom line: selected date with navigation hints, an in-flight request
// indicator, the key cheat sheet, and the most recent log line.

use crate::tui::app::{App, Screen};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let mut spans: Vec<Span> = Vec::new();
    if app.screen == Screen::Main {
        spans.push(Span::styled(
            format!(" {} ", app.selected_date.format("%Y-%m-%d")),
            Style::default().fg(theme.highlight),
        ));
        spans.push(Span::styled(
            "Ctrl+←/→ date │ F1-F3 tabs │ F4 profile │ F5 refresh │ F8 logout",
            Style::default().fg(theme.muted),
        ));
    }
    if app.is_loading() {
        spans.push(Span::styled(
            " │ ⟳ loading",
            Style::default().fg(theme.highlight),
        ));
    }
    if let Some(entry) = app.log_buffer.last() {
        spans.push(Span::styled(
            format!(" │ {} {}", entry.level.as_str(), entry.message),
            Style::default().fg(theme.muted),
        ));
    }

    let status = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(theme.foreground))
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}
