// Dashboard tab
//
// Day totals up top (consumed against the profile goal, burned,
// remaining as served by the API), macro breakdown and the weekly chart
// below. All numbers come straight from the last fetch; nothing is
// recomputed client-side except the chart models.

use super::macros_chart::MacrosChart;
use super::weekly_chart::WeeklyChart;
use super::render_placeholder;
use crate::chart::{MacroBreakdown, WeeklySeries};
use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Min(8),
        ])
        .split(area);

    render_totals(f, chunks[0], app);

    let breakdown = app
        .daily
        .as_ref()
        .and_then(|d| MacroBreakdown::from_macros(&d.macros));
    MacrosChart::render(f, chunks[1], breakdown.as_ref(), &app.theme);

    let series = app.weekly.as_ref().map(WeeklySeries::from_summary);
    WeeklyChart::render(f, chunks[2], series.as_ref(), &app.theme);
}

fn render_totals(f: &mut Frame, area: Rect, app: &App) {
    let Some(daily) = app.daily.as_ref() else {
        render_placeholder(f, area, "Today", "Loading daily summary...", &app.theme);
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
        .title(format!(" {} ", daily.date.format("%A, %d %B %Y")))
        .title_style(Style::default().fg(app.theme.title));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let goal = app
        .session
        .user
        .as_ref()
        .map(|u| u.daily_calories)
        .unwrap_or(0.0);
    let ratio = if goal > 0.0 {
        (daily.calories_consumed / goal).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let consumed = Gauge::default()
        .gauge_style(Style::default().fg(app.theme.consumed))
        .ratio(ratio)
        .label(format!(
            "Consumed {:.0} / {:.0} kcal",
            daily.calories_consumed, goal
        ));
    f.render_widget(consumed, rows[0]);

    let burned = Paragraph::new(Line::from(vec![
        Span::styled("Burned    ", Style::default().fg(app.theme.muted)),
        Span::styled(
            format!("{:.0} kcal", daily.calories_burned),
            Style::default().fg(app.theme.burned),
        ),
    ]));
    f.render_widget(burned, rows[1]);

    // Displayed exactly as served, negatives included
    let remaining_style = if daily.remaining_calories < 0.0 {
        Style::default()
            .fg(app.theme.error)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.success)
    };
    let remaining = Paragraph::new(Line::from(vec![
        Span::styled("Remaining ", Style::default().fg(app.theme.muted)),
        Span::styled(
            format!("{:.0} kcal", daily.remaining_calories),
            remaining_style,
        ),
    ]));
    f.render_widget(remaining, rows[2]);
}
