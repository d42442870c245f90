// Chart adapter - derived chart models for the dashboard
//
// Two derived views: the proportional macro breakdown of the current day
// and a grouped consumed-vs-burned series over the most recent seven
// days. Models are rebuilt from scratch on every data refresh; nothing is
// mutated in place, so no stale chart state can leak between refreshes.

use crate::api::models::{Macros, WeeklySummary};
use chrono::NaiveDate;

/// Proportional breakdown of one day's macro totals.
/// `from_macros` returns None when all totals are zero: the chart is
/// suppressed instead of rendering empty segments.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroBreakdown {
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
    total: f64,
}

impl MacroBreakdown {
    pub fn from_macros(macros: &Macros) -> Option<Self> {
        let total = macros.total();
        if total <= 0.0 {
            return None;
        }
        Some(Self {
            proteins: macros.proteins,
            carbs: macros.carbs,
            fats: macros.fats,
            total,
        })
    }

    pub fn proteins_ratio(&self) -> f64 {
        self.proteins / self.total
    }

    pub fn carbs_ratio(&self) -> f64 {
        self.carbs / self.total
    }

    pub fn fats_ratio(&self) -> f64 {
        self.fats / self.total
    }
}

/// One day of the weekly chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBars {
    pub date: NaiveDate,
    pub consumed: u64,
    pub burned: u64,
}

impl DayBars {
    /// Short weekday label under the bar group
    pub fn label(&self) -> String {
        self.date.format("%a").to_string()
    }
}

/// Consumed-vs-burned bars across the most recent seven days, ascending
#[derive(Debug, Clone, Default)]
pub struct WeeklySeries {
    pub days: Vec<DayBars>,
}

impl WeeklySeries {
    pub fn from_summary(summary: &WeeklySummary) -> Self {
        // BTreeMap iterates ascending by date; keep the trailing week
        let mut days: Vec<DayBars> = summary
            .daily_data
            .iter()
            .rev()
            .take(7)
            .map(|(date, totals)| DayBars {
                date: *date,
                consumed: totals.calories_consumed.round().max(0.0) as u64,
                burned: totals.calories_burned.round().max(0.0) as u64,
            })
            .collect();
        days.reverse();
        Self { days }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Upper bound for the bar axis
    pub fn max_value(&self) -> u64 {
        self.days
            .iter()
            .map(|d| d.consumed.max(d.burned))
            .max()
            .unwrap_or(1)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::DayTotals;
    use std::collections::BTreeMap;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn summary(entries: &[(u32, f64, f64)]) -> WeeklySummary {
        let mut daily_data = BTreeMap::new();
        for (day, consumed, burned) in entries {
            daily_data.insert(
                date(*day),
                DayTotals {
                    calories_consumed: *consumed,
                    calories_burned: *burned,
                },
            );
        }
        WeeklySummary { daily_data }
    }

    #[test]
    fn zero_macros_suppress_the_chart() {
        let macros = Macros {
            proteins: 0.0,
            carbs: 0.0,
            fats: 0.0,
        };
        assert!(MacroBreakdown::from_macros(&macros).is_none());
    }

    #[test]
    fn ratios_sum_to_one() {
        let macros = Macros {
            proteins: 80.0,
            carbs: 150.0,
            fats: 40.0,
        };
        let breakdown = MacroBreakdown::from_macros(&macros).unwrap();
        let sum = breakdown.proteins_ratio() + breakdown.carbs_ratio() + breakdown.fats_ratio();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!((breakdown.carbs_ratio() - 150.0 / 270.0).abs() < 1e-9);
    }

    #[test]
    fn weekly_series_is_ascending_and_rounded() {
        let series = WeeklySeries::from_summary(&summary(&[
            (3, 1800.4, 300.6),
            (1, 2000.0, 150.0),
            (2, 1500.0, 450.0),
        ]));
        let dates: Vec<_> = series.days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(1), date(2), date(3)]);
        assert_eq!(series.days[2].consumed, 1800);
        assert_eq!(series.days[2].burned, 301);
        assert_eq!(series.max_value(), 2000);
    }

    #[test]
    fn weekly_series_keeps_only_the_most_recent_seven_days() {
        let entries: Vec<(u32, f64, f64)> =
            (1..=10).map(|d| (d, 1000.0 + d as f64, 100.0)).collect();
        let series = WeeklySeries::from_summary(&summary(&entries));
        assert_eq!(series.days.len(), 7);
        assert_eq!(series.days.first().unwrap().date, date(4));
        assert_eq!(series.days.last().unwrap().date, date(10));
    }
}
