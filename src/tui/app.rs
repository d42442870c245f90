// TUI application state
//
// App owns every piece of mutable client state: the screen/tab navigator,
// the session, the selected date, the fetched daily/weekly data, the
// capture pipeline, and the form buffers. It is mutated only by the event
// loop thread; spawned network tasks report back as AppEvents.

use super::components::toast::Toast;
use super::forms::{Form, TextField};
use crate::actions;
use crate::activity::calculate_activity_calories;
use crate::api::models::{AuthResponse, DailyData, NewActivity, RegisterRequest, WeeklySummary};
use crate::api::{ApiClient, ApiError};
use crate::capture::{CapturePipeline, CaptureState};
use crate::events::AppEvent;
use crate::logging::LogBuffer;
use crate::session::SessionStore;
use crate::theme::Theme;
use chrono::{Days, Local, NaiveDate};
use std::path::Path;
use tokio::sync::mpsc::Sender;

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Main,
}

/// Sub-tabs of the unauthenticated screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

/// Tabs of the authenticated screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Diary,
    Activities,
}

impl Tab {
    pub fn all() -> [Tab; 3] {
        [Tab::Dashboard, Tab::Diary, Tab::Activities]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Diary => "Diary",
            Tab::Activities => "Activities",
        }
    }
}

/// Single-line path prompts that overlay the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Image file to analyze (upload entry of the capture pipeline)
    UploadImage,
    /// New profile photo
    ProfilePhoto,
}

pub struct Prompt {
    pub kind: PromptKind,
    pub field: TextField,
}

impl Prompt {
    pub fn new(kind: PromptKind) -> Self {
        let label = match kind {
            PromptKind::UploadImage => "Image path",
            PromptKind::ProfilePhoto => "Photo path",
        };
        Self {
            kind,
            field: TextField::new(label),
        }
    }
}

// Login form fields
pub const LOGIN_EMAIL: usize = 0;
pub const LOGIN_PASSWORD: usize = 1;

// Register form fields
pub const REG_NAME: usize = 0;
pub const REG_EMAIL: usize = 1;
pub const REG_PASSWORD: usize = 2;
pub const REG_AGE: usize = 3;
pub const REG_GENDER: usize = 4;
pub const REG_WEIGHT: usize = 5;
pub const REG_HEIGHT: usize = 6;
pub const REG_ACTIVITY: usize = 7;
pub const REG_GOAL_WEIGHT: usize = 8;

// Manual food form fields
pub const FOOD_NAME: usize = 0;
pub const FOOD_CALORIES: usize = 1;
pub const FOOD_PROTEINS: usize = 2;
pub const FOOD_CARBS: usize = 3;
pub const FOOD_FATS: usize = 4;
pub const FOOD_QUANTITY: usize = 5;

// Activity form fields
pub const ACT_NAME: usize = 0;
pub const ACT_DURATION: usize = 1;

/// Main application state for the TUI
pub struct App {
    pub screen: Screen,
    pub auth_tab: AuthTab,
    pub tab: Tab,

    pub session: SessionStore,
    api: ApiClient,
    tx: Sender<AppEvent>,

    /// The one selected date; daily data is always fetched for it
    pub selected_date: NaiveDate,
    /// Current day's data, wholly replaced on every fetch
    pub daily: Option<DailyData>,
    pub weekly: Option<WeeklySummary>,

    pub capture: CapturePipeline,
    /// Quantity multiplier for the staged analysis
    pub quantity_field: TextField,

    pub login_form: Form,
    pub register_form: Form,
    pub food_form: Form,
    pub activity_form: Form,
    pub prompt: Option<Prompt>,

    pub show_profile: bool,
    pub toast: Option<Toast>,
    pub should_quit: bool,
    in_flight: usize,

    pub log_buffer: LogBuffer,
    pub theme: Theme,
}

impl App {
    pub fn new(
        api: ApiClient,
        session: SessionStore,
        capture: CapturePipeline,
        tx: Sender<AppEvent>,
        log_buffer: LogBuffer,
    ) -> Self {
        Self {
            screen: Screen::Login,
            auth_tab: AuthTab::Login,
            tab: Tab::Dashboard,
            session,
            api,
            tx,
            selected_date: Local::now().date_naive(),
            daily: None,
            weekly: None,
            capture,
            quantity_field: TextField::with_value("Quantity", "1"),
            login_form: Form::new(vec![
                TextField::new("Email"),
                TextField::masked("Password"),
            ]),
            register_form: Form::new(vec![
                TextField::new("Name"),
                TextField::new("Email"),
                TextField::masked("Password"),
                TextField::new("Age"),
                TextField::new("Gender"),
                TextField::new("Weight (kg)"),
                TextField::new("Height (cm)"),
                TextField::new("Activity level"),
                TextField::new("Goal weight (kg)"),
            ]),
            food_form: Form::new(vec![
                TextField::new("Name"),
                TextField::new("Calories"),
                TextField::new("Proteins (g)"),
                TextField::new("Carbs (g)"),
                TextField::new("Fats (g)"),
                TextField::with_value("Quantity", "1"),
            ]),
            activity_form: Form::new(vec![
                TextField::new("Activity"),
                TextField::new("Duration (min)"),
            ]),
            prompt: None,
            show_profile: false,
            toast: None,
            should_quit: false,
            in_flight: 0,
            log_buffer,
            theme: Theme::default(),
        }
    }

    /// Startup: validate a restored token with a profile fetch, or land on
    /// the login screen.
    pub fn start(&mut self) {
        if let Some(token) = self.session.token.clone() {
            self.api = self.api.with_token(token);
            self.spawn(|app| actions::restore(app.api.clone(), app.tx.clone()));
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    fn spawn(&mut self, run: impl FnOnce(&Self)) {
        self.in_flight += 1;
        run(self);
    }

    pub fn show_success(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::success(message));
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::error(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    // === Navigation ===

    /// Switch tab and trigger the tab-scoped reload. Tabs never cache:
    /// re-entering a tab re-fetches.
    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.reload_tab();
    }

    pub fn reload_tab(&mut self) {
        match self.tab {
            Tab::Dashboard => self.load_dashboard(),
            Tab::Diary | Tab::Activities => self.load_daily(),
        }
    }

    /// Move the selected date and re-fetch. The previous day's data is
    /// never merged; the response fully replaces `daily` when it arrives.
    pub fn change_date(&mut self, days_forward: bool) {
        let delta = Days::new(1);
        self.selected_date = if days_forward {
            self.selected_date
                .checked_add_days(delta)
                .unwrap_or(self.selected_date)
        } else {
            self.selected_date
                .checked_sub_days(delta)
                .unwrap_or(self.selected_date)
        };
        self.load_daily();
    }

    fn enter_main(&mut self) {
        self.screen = Screen::Main;
        self.tab = Tab::Dashboard;
        self.load_dashboard();
    }

    fn fall_back_to_login(&mut self) {
        self.session.clear();
        self.api = self.api.without_token();
        self.screen = Screen::Login;
        self.auth_tab = AuthTab::Login;
        self.daily = None;
        self.weekly = None;
        self.show_profile = false;
        self.prompt = None;
        self.capture.cancel_stream();
        self.capture.discard();
    }

    pub fn logout(&mut self) {
        self.fall_back_to_login();
        self.show_success("Logged out");
    }

    // === Data loads ===

    fn load_dashboard(&mut self) {
        self.load_daily();
        self.spawn(|app| actions::load_weekly(app.api.clone(), app.tx.clone()));
    }

    fn load_daily(&mut self) {
        let date = self.selected_date;
        self.spawn(|app| actions::load_daily(app.api.clone(), app.tx.clone(), date));
    }

    // === Form submissions ===

    pub fn submit_login(&mut self) {
        let email = self.login_form.field(LOGIN_EMAIL).require_text();
        let password = self.login_form.field(LOGIN_PASSWORD).require_text();
        match (email, password) {
            (Ok(email), Ok(password)) => {
                self.spawn(|app| {
                    actions::login(app.api.without_token(), app.tx.clone(), email, password)
                });
            }
            (Err(msg), _) | (_, Err(msg)) => self.show_error(msg),
        }
    }

    pub fn submit_register(&mut self) {
        let request = self.build_register_request();
        match request {
            Ok(request) => {
                self.spawn(|app| {
                    actions::register(app.api.without_token(), app.tx.clone(), request)
                });
            }
            Err(msg) => self.show_error(msg),
        }
    }

    fn build_register_request(&self) -> Result<RegisterRequest, String> {
        let form = &self.register_form;
        Ok(RegisterRequest {
            name: form.field(REG_NAME).require_text()?,
            email: form.field(REG_EMAIL).require_text()?,
            password: form.field(REG_PASSWORD).require_text()?,
            age: form.field(REG_AGE).parse_u32()?,
            gender: form.field(REG_GENDER).require_text()?,
            weight: form.field(REG_WEIGHT).parse_f64()?,
            height: form.field(REG_HEIGHT).parse_f64()?,
            activity_level: form.field(REG_ACTIVITY).require_text()?,
            goal_weight: form.field(REG_GOAL_WEIGHT).parse_optional_f64()?,
        })
    }

    pub fn submit_food(&mut self) {
        let food = (|| {
            Ok::<_, String>(crate::api::models::NewFood {
                name: self.food_form.field(FOOD_NAME).require_text()?,
                calories: self.food_form.field(FOOD_CALORIES).parse_f64()?,
                proteins: self.food_form.field(FOOD_PROTEINS).parse_f64()?,
                carbs: self.food_form.field(FOOD_CARBS).parse_f64()?,
                fats: self.food_form.field(FOOD_FATS).parse_f64()?,
                quantity: self.food_form.field(FOOD_QUANTITY).parse_f64()?,
            })
        })();
        match food {
            Ok(food) => {
                self.spawn(|app| actions::add_food(app.api.clone(), app.tx.clone(), food));
            }
            Err(msg) => self.show_error(msg),
        }
    }

    pub fn submit_activity(&mut self) {
        let parsed = (|| {
            let name = self.activity_form.field(ACT_NAME).require_text()?;
            let duration = self.activity_form.field(ACT_DURATION).parse_u32()?;
            Ok::<_, String>((name, duration))
        })();
        match parsed {
            Ok((name, duration_minutes)) => {
                let calories_burned =
                    calculate_activity_calories(&name, duration_minutes, self.session.weight_kg());
                let activity = NewActivity {
                    name,
                    duration_minutes,
                    calories_burned,
                };
                self.spawn(|app| {
                    actions::add_activity(app.api.clone(), app.tx.clone(), activity)
                });
            }
            Err(msg) => self.show_error(msg),
        }
    }

    // === Capture pipeline ===

    pub fn start_capture(&mut self) {
        if let Err(e) = self.capture.start_stream() {
            tracing::warn!("Camera start failed: {}", e);
            self.show_error(e.user_message());
        }
    }

    pub fn capture_frame(&mut self) {
        match self.capture.capture() {
            Ok(image) => {
                self.spawn(|app| {
                    actions::analyze_image(
                        app.api.clone(),
                        app.tx.clone(),
                        image.clone(),
                        "capture.jpg".to_string(),
                    )
                });
            }
            Err(e) => {
                tracing::warn!("Frame capture failed: {}", e);
                self.show_error(e.user_message());
            }
        }
    }

    pub fn cancel_capture(&mut self) {
        self.capture.cancel_stream();
    }

    /// Upload entry: analyze a user-named image file, skipping streaming
    pub fn upload_image(&mut self, path: &Path) {
        match self.capture.load_upload(path) {
            Ok(image) => {
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "upload.jpg".to_string());
                self.spawn(|app| {
                    actions::analyze_image(app.api.clone(), app.tx.clone(), image.clone(), filename.clone())
                });
            }
            Err(e) => self.show_error(e.user_message()),
        }
    }

    /// Confirm the staged analysis with the entered quantity multiplier
    pub fn commit_staged(&mut self) {
        let quantity = match self.quantity_field.parse_f64() {
            Ok(q) => q,
            Err(msg) => {
                self.show_error(msg);
                return;
            }
        };
        if let Some(food) = self.capture.commit(quantity) {
            self.spawn(|app| actions::add_food(app.api.clone(), app.tx.clone(), food.clone()));
        }
    }

    pub fn discard_staged(&mut self) {
        self.capture.discard();
    }

    pub fn upload_profile_photo(&mut self, path: &Path) {
        match std::fs::read(path) {
            Ok(image) => {
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "photo.png".to_string());
                self.spawn(|app| {
                    actions::upload_photo(app.api.clone(), app.tx.clone(), image.clone(), filename.clone())
                });
            }
            Err(e) => {
                tracing::warn!("Photo read failed: {}", e);
                self.show_error("Could not read image file");
            }
        }
    }

    // === Event application ===

    /// Establish the session after any successful login or register
    fn complete_auth(&mut self, auth: AuthResponse) {
        self.session.establish(auth);
        if let Some(token) = self.session.token.clone() {
            self.api = self.api.with_token(token);
        }
        self.login_form.reset();
        self.register_form.reset();
        self.enter_main();
    }

    /// Auth failures clear the session and fall back to login; everything
    /// else becomes a toast and leaves displayed state intact.
    fn handle_error(&mut self, err: &ApiError) {
        tracing::warn!("Request failed: {}", err);
        let message = err.user_message();
        if matches!(err, ApiError::Unauthorized) {
            self.fall_back_to_login();
        }
        self.show_error(message);
    }

    /// Apply a completed network call. The only place fetched data enters
    /// app state.
    pub fn handle_app_event(&mut self, event: AppEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match event {
            AppEvent::LoginResult(Ok(auth)) => {
                self.complete_auth(auth);
                self.show_success("Logged in");
            }
            AppEvent::RegisterResult(Ok(auth)) => {
                self.complete_auth(auth);
                self.show_success("Account created");
            }
            AppEvent::LoginResult(Err(e)) | AppEvent::RegisterResult(Err(e)) => {
                // Server rejection: message verbatim, session untouched
                tracing::info!("Authentication failed: {}", e);
                self.show_error(e.user_message());
            }

            AppEvent::RestoreResult(Ok(profile)) => {
                self.session.set_user(profile);
                self.enter_main();
            }
            AppEvent::RestoreResult(Err(e)) => {
                // Any restore failure invalidates the persisted token
                tracing::info!("Session restore failed: {}", e);
                self.fall_back_to_login();
            }

            AppEvent::ProfileRefreshed(Ok(profile)) => {
                self.session.set_user(profile);
            }
            AppEvent::ProfileRefreshed(Err(e)) => self.handle_error(&e),

            AppEvent::DailyLoaded { date, result } => {
                if date != self.selected_date {
                    // Response for a date the user has already left
                    tracing::debug!("Dropping stale daily data for {}", date);
                    return;
                }
                match result {
                    Ok(daily) => self.daily = Some(daily),
                    Err(e) => self.handle_error(&e),
                }
            }

            AppEvent::WeeklyLoaded(result) => match result {
                Ok(weekly) => self.weekly = Some(weekly),
                // The weekly chart keeps its previous data on failure
                Err(e) => tracing::warn!("Weekly summary load failed: {}", e),
            },

            AppEvent::AnalysisDone(Ok(analysis)) => {
                self.capture.stage(analysis);
                self.quantity_field = TextField::with_value("Quantity", "1");
            }
            AppEvent::AnalysisDone(Err(e)) => {
                self.capture.analysis_failed();
                self.handle_error(&e);
            }

            AppEvent::FoodAdded(Ok(())) => {
                self.food_form.reset();
                self.food_form.fields[FOOD_QUANTITY].value = "1".to_string();
                self.show_success("Food added");
                self.load_daily();
            }
            AppEvent::FoodAdded(Err(e)) => self.handle_error(&e),

            AppEvent::ActivityAdded(Ok(())) => {
                self.activity_form.reset();
                self.show_success("Activity logged");
                self.load_daily();
            }
            AppEvent::ActivityAdded(Err(e)) => self.handle_error(&e),

            AppEvent::PhotoUploaded(Ok(())) => {
                self.show_success("Profile photo updated");
                self.spawn(|app| actions::refresh_profile(app.api.clone(), app.tx.clone()));
            }
            AppEvent::PhotoUploaded(Err(e)) => self.handle_error(&e),
        }
    }

    /// True while the diary tab should show the staged-analysis panel
    pub fn has_staged_analysis(&self) -> bool {
        self.capture.state() == CaptureState::Staged
    }
}
