// App events - completions of spawned network calls
//
// Every user-initiated API call runs in its own tokio task and reports
// back through one mpsc channel of these events. The TUI event loop is
// the only mutator of app state, so applying an event never races.

use crate::api::models::{AnalysisResult, AuthResponse, DailyData, Profile, WeeklySummary};
use crate::api::ApiError;
use chrono::NaiveDate;

#[derive(Debug)]
pub enum AppEvent {
    LoginResult(Result<AuthResponse, ApiError>),
    RegisterResult(Result<AuthResponse, ApiError>),
    /// Profile fetch that validates a restored token at startup
    RestoreResult(Result<Profile, ApiError>),
    /// Profile re-fetch after a photo upload
    ProfileRefreshed(Result<Profile, ApiError>),
    /// Tagged with the date the request was issued for; the app drops the
    /// response if the selected date has moved on since
    DailyLoaded {
        date: NaiveDate,
        result: Result<DailyData, ApiError>,
    },
    WeeklyLoaded(Result<WeeklySummary, ApiError>),
    AnalysisDone(Result<AnalysisResult, ApiError>),
    FoodAdded(Result<(), ApiError>),
    ActivityAdded(Result<(), ApiError>),
    PhotoUploaded(Result<(), ApiError>),
}
