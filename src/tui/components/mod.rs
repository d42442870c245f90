// Reusable TUI components

pub mod activities;
pub mod dashboard;
pub mod diary;
pub mod login;
pub mod macros_chart;
pub mod profile;
pub mod status_bar;
pub mod toast;
pub mod weekly_chart;

use crate::theme::Theme;
use crate::tui::forms::Form;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render a form as stacked "label: value" lines with the focused field
/// highlighted and carrying a cursor mark.
pub fn render_form(f: &mut Frame, area: Rect, form: &Form, title: &str, theme: &Theme) {
    let lines: Vec<Line> = form
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = i == form.focused;
            let label_style = if focused {
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted)
            };
            let value = if focused {
                format!("{}█", field.display_value())
            } else {
                field.display_value()
            };
            Line::from(vec![
                Span::styled(format!(" {:<16} ", field.label), label_style),
                Span::styled(value, Style::default().fg(theme.foreground)),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(theme.title));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Bordered placeholder used where a panel has no data yet
pub fn render_placeholder(f: &mut Frame, area: Rect, title: &str, message: &str, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(theme.title));

    let text = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(theme.muted),
    )))
    .block(block)
    .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(text, area);
}
