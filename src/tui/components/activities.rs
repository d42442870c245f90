// Activities tab
//
// The day's logged activities and the logging form. The burned-calorie
// preview updates as the form is edited so the user sees the number the
// submission will carry.

use super::{render_form, render_placeholder};
use crate::activity::{calculate_activity_calories, known_activities};
use crate::tui::app::{App, ACT_DURATION, ACT_NAME};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(9)])
        .split(area);

    render_activity_table(f, chunks[0], app);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_entry_panel(f, bottom[0], app);
    render_known_activities(f, bottom[1], app);
}

fn render_activity_table(f: &mut Frame, area: Rect, app: &App) {
    let Some(daily) = app.daily.as_ref() else {
        render_placeholder(f, area, "Activities", "Loading...", &app.theme);
        return;
    };
    if daily.activities.is_empty() {
        render_placeholder(
            f,
            area,
            "Activities",
            "No activities logged for this day",
            &app.theme,
        );
        return;
    }

    let header = Row::new(["Activity", "Duration", "Burned"]).style(
        Style::default()
            .fg(app.theme.highlight)
            .add_modifier(Modifier::BOLD),
    );
    let rows: Vec<Row> = daily
        .activities
        .iter()
        .map(|activity| {
            Row::new(vec![
                Cell::from(activity.name.clone()),
                Cell::from(format!("{} min", activity.duration_minutes)),
                Cell::from(format!("{} kcal", activity.calories_burned)),
            ])
            .style(Style::default().fg(app.theme.foreground))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border))
            .title(format!(" Activities ({}) ", daily.activities.len()))
            .title_style(Style::default().fg(app.theme.title)),
    );
    f.render_widget(table, area);
}

fn render_entry_panel(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(1)])
        .split(area);

    render_form(f, chunks[0], &app.activity_form, "Log activity", &app.theme);

    // Live preview with the same computation the submission uses
    let name = app.activity_form.field(ACT_NAME).trimmed();
    let duration = app.activity_form.field(ACT_DURATION).trimmed().parse::<u32>();
    let preview = match (name.is_empty(), duration) {
        (false, Ok(minutes)) => format!(
            " ≈ {} kcal burned",
            calculate_activity_calories(name, minutes, app.session.weight_kg())
        ),
        _ => String::new(),
    };
    f.render_widget(
        Paragraph::new(Span::styled(preview, Style::default().fg(app.theme.burned))),
        chunks[1],
    );
}

fn render_known_activities(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = known_activities()
        .map(|name| Line::from(Span::styled(format!(" {}", name), Style::default().fg(app.theme.muted))))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
        .title(" Known activities ")
        .title_style(Style::default().fg(app.theme.title));
    f.render_widget(Paragraph::new(lines).block(block), area);
}
