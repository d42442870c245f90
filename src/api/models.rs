// Wire model for the nutrition API
//
// These structs mirror the JSON bodies the service sends and accepts.
// Field names follow the wire (snake_case), so no serde renames are needed.
// FoodEntry macro values are per-unit: display code multiplies by quantity
// at render time, nothing is stored pre-multiplied.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// User profile as returned by `GET /profile` and inside auth responses.
/// Replaced wholesale on every fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub age: u32,
    /// Body weight in kilograms; drives the activity calorie computation
    pub weight: f64,
    /// Height in centimeters
    pub height: f64,
    /// Daily calorie target computed by the server
    #[serde(default)]
    pub daily_calories: f64,
    #[serde(default)]
    pub activity_level: String,
    #[serde(default)]
    pub goal_weight: Option<f64>,
    /// Base64-encoded PNG, present once the user has uploaded a photo
    #[serde(default)]
    pub profile_photo: Option<String>,
}

/// Successful response of `POST /login` and `POST /register`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: Profile,
}

/// Registration payload for `POST /register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: u32,
    pub gender: String,
    pub weight: f64,
    pub height: f64,
    pub activity_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_weight: Option<f64>,
}

/// Macro totals in grams for one day
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Macros {
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl Macros {
    pub fn total(&self) -> f64 {
        self.proteins + self.carbs + self.fats
    }
}

/// A logged food. Calories and macros are per unit; `quantity` is the
/// multiplier applied at display time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntry {
    pub name: String,
    pub calories: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
    pub quantity: f64,
}

impl FoodEntry {
    /// Displayed calorie total: per-unit calories times quantity, rounded
    pub fn total_calories(&self) -> i64 {
        (self.calories * self.quantity).round() as i64
    }

    /// Displayed macro totals: per-unit grams times quantity
    pub fn total_proteins(&self) -> f64 {
        self.proteins * self.quantity
    }

    pub fn total_carbs(&self) -> f64 {
        self.carbs * self.quantity
    }

    pub fn total_fats(&self) -> f64 {
        self.fats * self.quantity
    }
}

/// A logged physical activity. `calories_burned` is computed client-side
/// before submission; the server stores it as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub name: String,
    pub duration_minutes: u32,
    pub calories_burned: i64,
}

/// Server-aggregated data for one calendar date (`GET /daily-summary`)
#[derive(Debug, Clone, Deserialize)]
pub struct DailyData {
    pub date: NaiveDate,
    pub calories_consumed: f64,
    pub calories_burned: f64,
    pub remaining_calories: f64,
    #[serde(default)]
    pub macros: Macros,
    #[serde(default)]
    pub foods: Vec<FoodEntry>,
    #[serde(default)]
    pub activities: Vec<ActivityEntry>,
}

/// Per-day totals inside the weekly summary
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DayTotals {
    pub calories_consumed: f64,
    pub calories_burned: f64,
}

/// Response of `GET /weekly-summary`. A BTreeMap keeps the dates in
/// ascending order, which is the display order for the weekly chart.
#[derive(Debug, Clone, Deserialize)]
pub struct WeeklySummary {
    pub daily_data: BTreeMap<NaiveDate, DayTotals>,
}

/// Image-analysis result from `POST /analyze-food`. Transient: held only
/// until the user confirms a quantity or dismisses it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisResult {
    pub food_name: String,
    pub calories: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Envelope of `POST /analyze-food`
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(default)]
    pub analysis: Option<AnalysisResult>,
}

/// Payload for `POST /add-food`
#[derive(Debug, Clone, Serialize)]
pub struct NewFood {
    pub name: String,
    pub calories: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
    pub quantity: f64,
}

/// Payload for `POST /add-activity`
#[derive(Debug, Clone, Serialize)]
pub struct NewActivity {
    pub name: String,
    pub duration_minutes: u32,
    pub calories_burned: i64,
}

/// Error body the service sends with non-2xx responses
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn food_entry_total_is_rounded_per_unit_times_quantity() {
        let food = FoodEntry {
            name: "Iogurte".to_string(),
            calories: 250.0,
            proteins: 10.0,
            carbs: 30.0,
            fats: 8.0,
            quantity: 1.5,
        };
        assert_eq!(food.total_calories(), 375);
    }

    #[test]
    fn food_entry_macro_totals_are_per_unit_times_quantity() {
        let food = FoodEntry {
            name: "Arroz".to_string(),
            calories: 130.0,
            proteins: 2.7,
            carbs: 28.0,
            fats: 0.3,
            quantity: 2.0,
        };
        assert_eq!(food.total_proteins(), 5.4);
        assert_eq!(food.total_carbs(), 56.0);
        assert_eq!(food.total_fats(), 0.6);
    }

    #[test]
    fn weekly_summary_keys_deserialize_sorted() {
        let json = r#"{
            "daily_data": {
                "2025-03-03": {"calories_consumed": 1800, "calories_burned": 300},
                "2025-03-01": {"calories_consumed": 2000, "calories_burned": 150},
                "2025-03-02": {"calories_consumed": 1500, "calories_burned": 450}
            }
        }"#;
        let summary: WeeklySummary = serde_json::from_str(json).unwrap();
        let dates: Vec<_> = summary.daily_data.keys().copied().collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            ]
        );
    }

    #[test]
    fn register_request_omits_absent_goal_weight() {
        let req = RegisterRequest {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "secret".into(),
            age: 29,
            gender: "female".into(),
            weight: 62.0,
            height: 168.0,
            activity_level: "moderate".into(),
            goal_weight: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("goal_weight").is_none());
    }
}
