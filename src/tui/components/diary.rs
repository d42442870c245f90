// Diary tab
//
// The day's food entries, the capture pipeline panel, and the manual
// entry form. The capture panel changes with the pipeline state; the
// staged state shows the analysis result with the quantity field and
// confirm/discard hints.

use super::{render_form, render_placeholder};
use crate::capture::CaptureState;
use crate::tui::app::App;
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
        .constraints([Constraint::Min(6), Constraint::Length(10)])
        .split(area);

    render_food_table(f, chunks[0], app);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_capture_panel(f, bottom[0], app);
    render_form(f, bottom[1], &app.food_form, "Add food manually", &app.theme);
}

fn render_food_table(f: &mut Frame, area: Rect, app: &App) {
    let Some(daily) = app.daily.as_ref() else {
        render_placeholder(f, area, "Foods", "Loading...", &app.theme);
        return;
    };
    if daily.foods.is_empty() {
        render_placeholder(f, area, "Foods", "No foods recorded for this day", &app.theme);
        return;
    }

    let header = Row::new(["Food", "Qty", "Kcal", "Prot", "Carb", "Fat", "Total"])
        .style(
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        );
    let rows: Vec<Row> = daily
        .foods
        .iter()
        .map(|food| {
            // Macros and calories display quantity-multiplied
            Row::new(vec![
                Cell::from(food.name.clone()),
                Cell::from(format!("{:.1}", food.quantity)),
                Cell::from(format!("{:.0}", food.calories)),
                Cell::from(format!("{:.1}g", food.total_proteins())),
                Cell::from(format!("{:.1}g", food.total_carbs())),
                Cell::from(format!("{:.1}g", food.total_fats())),
                Cell::from(format!("{}", food.total_calories())),
            ])
            .style(Style::default().fg(app.theme.foreground))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(7),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border))
            .title(format!(" Foods ({}) ", daily.foods.len()))
            .title_style(Style::default().fg(app.theme.title)),
    );
    f.render_widget(table, area);
}

fn render_capture_panel(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(" Photo analysis ")
        .title_style(Style::default().fg(theme.title));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let muted = Style::default().fg(theme.muted);
    let lines: Vec<Line> = match app.capture.state() {
        CaptureState::Idle => vec![
            Line::from(Span::styled("Analyze a meal photo:", muted)),
            Line::from(Span::styled("  F6      start camera", muted)),
            Line::from(Span::styled("  Ctrl+U  upload an image file", muted)),
        ],
        CaptureState::Streaming => vec![
            Line::from(Span::styled(
                "● Camera active",
                Style::default().fg(theme.error),
            )),
            Line::from(Span::styled("  F6   capture frame", muted)),
            Line::from(Span::styled("  Esc  cancel", muted)),
        ],
        CaptureState::Analyzing => vec![Line::from(Span::styled(
            "Analyzing image...",
            Style::default().fg(theme.highlight),
        ))],
        CaptureState::Staged => staged_lines(app),
    };
    f.render_widget(Paragraph::new(lines), inner);
}

fn staged_lines(app: &App) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let muted = Style::default().fg(theme.muted);
    let Some(analysis) = app.capture.staged() else {
        return vec![];
    };
    vec![
        Line::from(Span::styled(
            analysis.food_name.clone(),
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "{:.0} kcal │ P {:.1}g │ C {:.1}g │ F {:.1}g",
                analysis.calories, analysis.proteins, analysis.carbs, analysis.fats
            ),
            Style::default().fg(theme.foreground),
        )),
        Line::from(vec![
            Span::styled("Quantity: ", muted),
            Span::styled(
                format!("{}█", app.quantity_field.value),
                Style::default().fg(theme.highlight),
            ),
        ]),
        Line::from(Span::styled("Enter confirm │ Esc discard", muted)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{DailyData, FoodEntry, Macros};
    use crate::api::ApiClient;
    use crate::capture::{CapturePipeline, NoCamera};
    use crate::logging::LogBuffer;
    use crate::session::{SessionStore, TokenStore};
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;

    fn app_with_food(food: FoodEntry) -> App {
        let path = std::env::temp_dir().join(format!(
            "nutrack-diary-test-{}-{}",
            std::process::id(),
            food.name
        ));
        let store = TokenStore::new(path);
        store.clear();
        let (tx, _rx) = mpsc::channel(8);
        let mut app = App::new(
            ApiClient::new("http://127.0.0.1:1/api").unwrap(),
            SessionStore::new(store),
            CapturePipeline::new(Box::new(NoCamera)),
            tx,
            LogBuffer::new(),
        );
        let date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        app.daily = Some(DailyData {
            date,
            calories_consumed: 260.0,
            calories_burned: 0.0,
            remaining_calories: 1640.0,
            macros: Macros {
                proteins: 5.4,
                carbs: 56.0,
                fats: 0.6,
            },
            foods: vec![food],
            activities: vec![],
        });
        app
    }

    fn rendered_text(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render(f, area, app);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn food_row_shows_quantity_multiplied_macros() {
        let app = app_with_food(FoodEntry {
            name: "Arroz".to_string(),
            calories: 130.0,
            proteins: 2.7,
            carbs: 28.0,
            fats: 0.3,
            quantity: 2.0,
        });

        let content = rendered_text(&app);
        assert!(content.contains("Arroz"));
        // Per-unit grams times quantity, not the raw per-unit values
        assert!(content.contains("5.4g"));
        assert!(content.contains("56.0g"));
        assert!(content.contains("0.6g"));
        // Calorie total is also quantity-multiplied
        assert!(content.contains("260"));
    }
}
