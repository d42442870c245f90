// Macro breakdown panel
//
// Three stacked gauges showing each macro's share of the day's total
// grams. Suppressed (placeholder text) when all totals are zero.

use super::render_placeholder;
use crate::chart::MacroBreakdown;
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
    Frame,
};

pub struct MacrosChart;

impl MacrosChart {
    pub fn render(f: &mut Frame, area: Rect, breakdown: Option<&MacroBreakdown>, theme: &Theme) {
        let Some(breakdown) = breakdown else {
            render_placeholder(f, area, "Macros", "No macros recorded today", theme);
            return;
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(" Macros ")
            .title_style(Style::default().fg(theme.title));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let rows = [
            ("Proteins", breakdown.proteins, breakdown.proteins_ratio(), theme.proteins),
            ("Carbs", breakdown.carbs, breakdown.carbs_ratio(), theme.carbs),
            ("Fats", breakdown.fats, breakdown.fats_ratio(), theme.fats),
        ];
        for (chunk, (label, grams, ratio, color)) in chunks.iter().zip(rows) {
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(color).bg(Color::Reset))
                .ratio(ratio.clamp(0.0, 1.0))
                .label(format!("{} {:.0}g ({:.0}%)", label, grams, ratio * 100.0));
            f.render_widget(gauge, *chunk);
        }
    }
}
