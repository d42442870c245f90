// API gateway for the remote nutrition service
//
// Single responsibility: attach the bearer token to authenticated calls,
// pick JSON vs multipart encoding per endpoint, and classify responses.
// Nothing panics across this boundary - every call returns Result and
// callers branch on it (usually into a toast).

pub mod models;

use anyhow::Context;
use chrono::NaiveDate;
use models::{
    AnalysisResult, AnalyzeResponse, AuthResponse, DailyData, ErrorBody, NewActivity, NewFood,
    Profile, RegisterRequest, WeeklySummary,
};
use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::fmt;
use std::time::Duration;

/// Errors crossing the gateway boundary
#[derive(Debug)]
pub enum ApiError {
    /// 401 - expired/invalid token; the session must be cleared
    Unauthorized,
    /// Non-2xx response; `message` is the server-supplied detail when present
    Server { status: u16, message: String },
    /// Transport-level failure (DNS, refused connection, timeout)
    Network(String),
    /// Response body was not the JSON we expected
    Decode(String),
}

impl ApiError {
    /// Message shown in the toast notification.
    /// Server details pass through verbatim; transport and decode failures
    /// collapse into a generic connectivity message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized => "Session expired, please log in again".to_string(),
            Self::Server { message, .. } => message.clone(),
            Self::Network(_) | Self::Decode(_) => "Connection error".to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "Unauthorized (token rejected)"),
            Self::Server { status, message } => write!(f, "API error ({}): {}", status, message),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

/// HTTP client for the nutrition API.
/// Cheap to clone; each spawned task gets its own copy with the token
/// that was current when the action started.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create an unauthenticated client against the given base URL
    /// (e.g. `http://127.0.0.1:8001/api`).
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Copy of this client carrying a bearer token
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..self.clone()
        }
    }

    /// Copy of this client with no token attached
    pub fn without_token(&self) -> Self {
        Self {
            token: None,
            ..self.clone()
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach `Authorization: Bearer <token>` when a token is present
    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Classify a response: 2xx parses as `T`, 401 on a token-bearing call
    /// maps to Unauthorized (the session must be cleared), any other
    /// non-2xx carries the server's `detail` message when present. A 401
    /// on an unauthenticated call (bad login credentials) keeps its detail.
    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if self.token.is_some() && status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()));
        }
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| format!("Request failed ({})", status.as_u16()));
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    /// Like `read_json` but for ack-only endpoints where the body is ignored
    async fn read_ack(&self, response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();
        if self.token.is_some() && status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if status.is_success() {
            return Ok(());
        }
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| format!("Request failed ({})", status.as_u16()));
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    /// `POST /login`
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        self.read_json(response).await
    }

    /// `POST /register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/register"))
            .json(request)
            .send()
            .await?;
        self.read_json(response).await
    }

    /// `GET /profile`
    pub async fn profile(&self) -> Result<Profile, ApiError> {
        let response = self.authed(self.http.get(self.url("/profile"))).send().await?;
        self.read_json(response).await
    }

    /// `GET /daily-summary?date=YYYY-MM-DD`
    pub async fn daily_summary(&self, date: NaiveDate) -> Result<DailyData, ApiError> {
        let response = self
            .authed(self.http.get(self.url("/daily-summary")))
            .query(&[("date", date.format("%Y-%m-%d").to_string())])
            .send()
            .await?;
        self.read_json(response).await
    }

    /// `GET /weekly-summary`
    pub async fn weekly_summary(&self) -> Result<WeeklySummary, ApiError> {
        let response = self
            .authed(self.http.get(self.url("/weekly-summary")))
            .send()
            .await?;
        self.read_json(response).await
    }

    /// `POST /analyze-food` - multipart image upload, returns the
    /// transient analysis the user confirms before it becomes a food entry
    pub async fn analyze_food(
        &self,
        image: Vec<u8>,
        filename: &str,
    ) -> Result<AnalysisResult, ApiError> {
        let part = multipart::Part::bytes(image)
            .file_name(filename.to_string())
            .mime_str("image/jpeg")
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .authed(self.http.post(self.url("/analyze-food")))
            .multipart(form)
            .send()
            .await?;

        let body: AnalyzeResponse = self.read_json(response).await?;
        match body.analysis {
            Some(analysis) if body.success => Ok(analysis),
            _ => Err(ApiError::Server {
                status: 200,
                message: "Image analysis failed".to_string(),
            }),
        }
    }

    /// `POST /add-food`
    pub async fn add_food(&self, food: &NewFood) -> Result<(), ApiError> {
        let response = self
            .authed(self.http.post(self.url("/add-food")))
            .json(food)
            .send()
            .await?;
        self.read_ack(response).await
    }

    /// `POST /add-activity`
    pub async fn add_activity(&self, activity: &NewActivity) -> Result<(), ApiError> {
        let response = self
            .authed(self.http.post(self.url("/add-activity")))
            .json(activity)
            .send()
            .await?;
        self.read_ack(response).await
    }

    /// `POST /upload-profile-photo` - multipart image upload
    pub async fn upload_profile_photo(
        &self,
        image: Vec<u8>,
        filename: &str,
    ) -> Result<(), ApiError> {
        let part = multipart::Part::bytes(image)
            .file_name(filename.to_string())
            .mime_str("image/png")
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .authed(self.http.post(self.url("/upload-profile-photo")))
            .multipart(form)
            .send()
            .await?;
        self.read_ack(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(server: &mockito::Server) -> ApiClient {
        ApiClient::new(server.url()).unwrap()
    }

    const PROFILE_JSON: &str = r#"{
        "name": "Ana", "email": "ana@example.com", "age": 29,
        "weight": 62.0, "height": 168.0, "daily_calories": 1900.0,
        "activity_level": "moderate"
    }"#;

    #[tokio::test]
    async fn login_returns_token_and_user_on_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/login")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_body(format!(r#"{{"token": "tok-1", "user": {}}}"#, PROFILE_JSON))
            .create_async()
            .await;

        let auth = client(&server).login("ana@example.com", "pw").await.unwrap();
        assert_eq!(auth.token, "tok-1");
        assert_eq!(auth.user.name, "Ana");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn login_rejection_surfaces_server_detail_verbatim() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/login")
            .with_status(400)
            .with_body(r#"{"detail": "Credenciais inválidas"}"#)
            .create_async()
            .await;

        let err = client(&server).login("ana@example.com", "bad").await.unwrap_err();
        assert_eq!(err.user_message(), "Credenciais inválidas");
    }

    #[tokio::test]
    async fn missing_detail_falls_back_to_generic_marker() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/add-food")
            .with_status(500)
            .with_body("oops")
            .create_async()
            .await;

        let food = NewFood {
            name: "Arroz".into(),
            calories: 130.0,
            proteins: 2.7,
            carbs: 28.0,
            fats: 0.3,
            quantity: 1.0,
        };
        let err = client(&server).add_food(&food).await.unwrap_err();
        assert_eq!(err.user_message(), "Request failed (500)");
    }

    #[tokio::test]
    async fn profile_fetch_attaches_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/profile")
            .match_header("authorization", "Bearer tok-9")
            .with_status(200)
            .with_body(PROFILE_JSON)
            .create_async()
            .await;

        let profile = client(&server).with_token("tok-9").profile().await.unwrap();
        assert_eq!(profile.email, "ana@example.com");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_token_maps_to_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/profile")
            .with_status(401)
            .with_body(r#"{"detail": "Token expired"}"#)
            .create_async()
            .await;

        let err = client(&server)
            .with_token("expired-abc")
            .profile()
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn daily_summary_sends_date_query_param() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/daily-summary")
            .match_query(mockito::Matcher::UrlEncoded(
                "date".into(),
                "2025-03-02".into(),
            ))
            .with_status(200)
            .with_body(
                r#"{
                    "date": "2025-03-02",
                    "calories_consumed": 1500.0,
                    "calories_burned": 320.0,
                    "remaining_calories": 720.0,
                    "macros": {"proteins": 80.0, "carbs": 150.0, "fats": 40.0},
                    "foods": [],
                    "activities": []
                }"#,
            )
            .create_async()
            .await;

        let date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let daily = client(&server)
            .with_token("tok-1")
            .daily_summary(date)
            .await
            .unwrap();
        assert_eq!(daily.date, date);
        assert_eq!(daily.macros.proteins, 80.0);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn analyze_food_posts_multipart_and_returns_analysis() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/analyze-food")
            .match_header(
                "content-type",
                mockito::Matcher::Regex("multipart/form-data.*".into()),
            )
            .with_status(200)
            .with_body(
                r#"{
                    "success": true,
                    "analysis": {
                        "food_name": "Feijoada", "calories": 450.0,
                        "proteins": 25.0, "carbs": 40.0, "fats": 20.0
                    }
                }"#,
            )
            .create_async()
            .await;

        let analysis = client(&server)
            .with_token("tok-1")
            .analyze_food(vec![0xFF, 0xD8, 0xFF], "capture.jpg")
            .await
            .unwrap();
        assert_eq!(analysis.food_name, "Feijoada");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn analyze_food_without_success_flag_is_a_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/analyze-food")
            .with_status(200)
            .with_body(r#"{"success": false}"#)
            .create_async()
            .await;

        let err = client(&server)
            .with_token("tok-1")
            .analyze_food(vec![1, 2, 3], "capture.jpg")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Image analysis failed");
    }

    #[tokio::test]
    async fn connection_failure_maps_to_generic_message() {
        // Port 1 is never listening
        let client = ApiClient::new("http://127.0.0.1:1/api").unwrap();
        let err = client.login("a@b.c", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(err.user_message(), "Connection error");
    }
}
