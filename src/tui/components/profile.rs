// Profile modal
//
// Centered overlay with the current profile. The photo is a server-side
// path; only its presence is shown here, replacing it goes through the
// Ctrl+P prompt.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let width = 48.min(area.width.saturating_sub(4));
    let height = 13.min(area.height.saturating_sub(2));
    let modal = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    let muted = Style::default().fg(theme.muted);
    let value = Style::default().fg(theme.foreground);

    let lines: Vec<Line> = match app.session.user.as_ref() {
        Some(user) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    user.name.clone(),
                    Style::default()
                        .fg(theme.foreground)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(user.email.clone(), muted)),
                Line::default(),
                row("Age", format!("{}", user.age), muted, value),
                row("Weight", format!("{:.1} kg", user.weight), muted, value),
                row("Height", format!("{:.0} cm", user.height), muted, value),
                row(
                    "Daily goal",
                    format!("{:.0} kcal", user.daily_calories),
                    muted,
                    value,
                ),
                row("Activity", user.activity_level.clone(), muted, value),
            ];
            if let Some(goal) = user.goal_weight {
                lines.push(row("Goal weight", format!("{:.1} kg", goal), muted, value));
            }
            let photo = if user.profile_photo.is_some() {
                "set"
            } else {
                "not set"
            };
            lines.push(row("Photo", photo.to_string(), muted, value));
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "Ctrl+P change photo │ Esc close",
                muted,
            )));
            lines
        }
        None => vec![Line::from(Span::styled("Profile not loaded", muted))],
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.highlight))
        .title(" Profile ")
        .title_style(Style::default().fg(theme.title));

    f.render_widget(Clear, modal);
    f.render_widget(Paragraph::new(lines).block(block), modal);
}

fn row(label: &str, text: String, muted: Style, value: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<12}", label), muted),
        Span::styled(text, value),
    ])
}
