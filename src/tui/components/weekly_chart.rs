// Weekly consumed-vs-burned chart
//
// Grouped bars per day over the trailing week, weekday labels underneath.
// The series is rebuilt from the latest weekly summary on every render.

use super::render_placeholder;
use crate::chart::WeeklySeries;
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
    Frame,
};

pub struct WeeklyChart;

impl WeeklyChart {
    pub fn render(f: &mut Frame, area: Rect, series: Option<&WeeklySeries>, theme: &Theme) {
        let Some(series) = series.filter(|s| !s.is_empty()) else {
            render_placeholder(f, area, "Last 7 days", "No weekly data yet", theme);
            return;
        };

        let groups: Vec<BarGroup> = series
            .days
            .iter()
            .map(|day| {
                BarGroup::default().label(day.label().into()).bars(&[
                    Bar::default()
                        .value(day.consumed)
                        .style(Style::default().fg(theme.consumed)),
                    Bar::default()
                        .value(day.burned)
                        .style(Style::default().fg(theme.burned)),
                ])
            })
            .collect();

        let mut chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(Style::default().fg(theme.border))
                    .title(" Last 7 days (consumed / burned kcal) ")
                    .title_style(Style::default().fg(theme.title)),
            )
            .bar_width(4)
            .bar_gap(0)
            .group_gap(2)
            .max(series.max_value());
        for group in groups {
            chart = chart.data(group);
        }
        f.render_widget(chart, area);
    }
}
