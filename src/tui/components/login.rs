// Unauthenticated screen: login and register forms

use super::render_form;
use crate::tui::app::{App, AuthTab};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let form_height = match app.auth_tab {
        AuthTab::Login => 4,
        AuthTab::Register => 11,
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(form_height),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(centered(area));

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "NuTrack",
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "nutrition and fitness tracking",
            Style::default().fg(app.theme.muted),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    match app.auth_tab {
        AuthTab::Login => render_form(f, chunks[1], &app.login_form, "Sign in", &app.theme),
        AuthTab::Register => {
            render_form(f, chunks[1], &app.register_form, "Create account", &app.theme)
        }
    }

    let toggle = match app.auth_tab {
        AuthTab::Login => "Ctrl+R register",
        AuthTab::Register => "Ctrl+R sign in",
    };
    let hints = Paragraph::new(Line::from(Span::styled(
        format!("Enter submit │ Tab next field │ {} │ Esc quit", toggle),
        Style::default().fg(app.theme.muted),
    )))
    .alignment(Alignment::Center);
    f.render_widget(hints, chunks[2]);
}

/// Center a fixed-width column in the terminal
fn centered(area: Rect) -> Rect {
    let width = 60.min(area.width);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + area.height / 6;
    Rect::new(x, y, width, area.height.saturating_sub(y - area.y))
}
