// UI rendering - per-frame draw dispatch
//
// The frame is a function of App alone. Screens pick the content, then
// the overlays stack on top: profile modal, path prompt, toast.

use super::app::{App, Prompt, Screen, Tab};
use super::components;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

/// Main render function, called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    match app.screen {
        Screen::Login => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(10), Constraint::Length(2)])
                .split(area);
            components::login::render(f, chunks[0], app);
            components::status_bar::render(f, chunks[1], app);
        }
        Screen::Main => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(2),
                    Constraint::Min(10),
                    Constraint::Length(2),
                ])
                .split(area);

            render_tab_bar(f, chunks[0], app);
            match app.tab {
                Tab::Dashboard => components::dashboard::render(f, chunks[1], app),
                Tab::Diary => components::diary::render(f, chunks[1], app),
                Tab::Activities => components::activities::render(f, chunks[1], app),
            }
            components::status_bar::render(f, chunks[2], app);

            if app.show_profile {
                components::profile::render(f, area, app);
            }
        }
    }

    if let Some(prompt) = app.prompt.as_ref() {
        render_prompt(f, area, prompt, app);
    }
    if let Some(toast) = app.toast.as_ref() {
        toast.render(f, area, &app.theme);
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<String> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| format!("F{} {}", i + 1, tab.name()))
        .collect();
    let selected = Tab::all().iter().position(|t| *t == app.tab).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(app.theme.muted))
        .highlight_style(
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(tabs, area);
}

/// Single-line path prompt, centered
fn render_prompt(f: &mut Frame, area: Rect, prompt: &Prompt, app: &App) {
    let theme = &app.theme;
    let width = 60.min(area.width.saturating_sub(4));
    let modal = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height / 2).saturating_sub(1),
        width,
        3,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.highlight))
        .title(format!(" {} (Enter confirm, Esc cancel) ", prompt.field.label))
        .title_style(Style::default().fg(theme.title));

    let input = Paragraph::new(format!("{}█", prompt.field.value))
        .style(Style::default().fg(theme.foreground))
        .block(block);

    f.render_widget(Clear, modal);
    f.render_widget(input, modal);
}
