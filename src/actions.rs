// Actions - spawned network tasks for user-initiated operations
//
// Each function clones the API client and fires one request in a tokio
// task, reporting the outcome through the AppEvent channel. The UI thread
// never awaits network I/O directly.

use crate::api::models::{NewActivity, NewFood, RegisterRequest};
use crate::api::ApiClient;
use crate::events::AppEvent;
use chrono::NaiveDate;
use tokio::sync::mpsc::Sender;

pub fn login(api: ApiClient, tx: Sender<AppEvent>, email: String, password: String) {
    tokio::spawn(async move {
        let result = api.login(&email, &password).await;
        let _ = tx.send(AppEvent::LoginResult(result)).await;
    });
}

pub fn register(api: ApiClient, tx: Sender<AppEvent>, request: RegisterRequest) {
    tokio::spawn(async move {
        let result = api.register(&request).await;
        let _ = tx.send(AppEvent::RegisterResult(result)).await;
    });
}

/// Validate a restored token by fetching the profile
pub fn restore(api: ApiClient, tx: Sender<AppEvent>) {
    tokio::spawn(async move {
        let result = api.profile().await;
        let _ = tx.send(AppEvent::RestoreResult(result)).await;
    });
}

pub fn refresh_profile(api: ApiClient, tx: Sender<AppEvent>) {
    tokio::spawn(async move {
        let result = api.profile().await;
        let _ = tx.send(AppEvent::ProfileRefreshed(result)).await;
    });
}

/// Fetch the daily summary, tagging the response with the requested date
pub fn load_daily(api: ApiClient, tx: Sender<AppEvent>, date: NaiveDate) {
    tokio::spawn(async move {
        let result = api.daily_summary(date).await;
        let _ = tx.send(AppEvent::DailyLoaded { date, result }).await;
    });
}

pub fn load_weekly(api: ApiClient, tx: Sender<AppEvent>) {
    tokio::spawn(async move {
        let result = api.weekly_summary().await;
        let _ = tx.send(AppEvent::WeeklyLoaded(result)).await;
    });
}

pub fn analyze_image(api: ApiClient, tx: Sender<AppEvent>, image: Vec<u8>, filename: String) {
    tokio::spawn(async move {
        let result = api.analyze_food(image, &filename).await;
        let _ = tx.send(AppEvent::AnalysisDone(result)).await;
    });
}

pub fn add_food(api: ApiClient, tx: Sender<AppEvent>, food: NewFood) {
    tokio::spawn(async move {
        let result = api.add_food(&food).await;
        let _ = tx.send(AppEvent::FoodAdded(result)).await;
    });
}

pub fn add_activity(api: ApiClient, tx: Sender<AppEvent>, activity: NewActivity) {
    tokio::spawn(async move {
        let result = api.add_activity(&activity).await;
        let _ = tx.send(AppEvent::ActivityAdded(result)).await;
    });
}

pub fn upload_photo(api: ApiClient, tx: Sender<AppEvent>, image: Vec<u8>, filename: String) {
    tokio::spawn(async move {
        let result = api.upload_profile_photo(image, &filename).await;
        let _ = tx.send(AppEvent::PhotoUploaded(result)).await;
    });
}
