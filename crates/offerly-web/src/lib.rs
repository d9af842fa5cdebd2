//! JSON HTTP endpoint for the Offerly pricing calculator.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use offerly_core::{PricingResult, ProjectDraft, SettingsOverrides, ValidationReport};
use offerly_pricing::{PricingEngine, RateCard};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct WebConfig {
    pub port: u16,
    pub rates_path: Option<PathBuf>,
    /// Server-side settings; request `user_settings` are layered on top.
    pub settings: SettingsOverrides,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            rates_path: None,
            settings: SettingsOverrides::default(),
        }
    }
}

impl WebConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("OFFERLY_WEB_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8000);
        let rates_path = std::env::var("OFFERLY_RATES_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let settings = SettingsOverrides {
            minimum_project_price: std::env::var("OFFERLY_MINIMUM_PROJECT_PRICE")
                .ok()
                .and_then(|v| v.parse().ok()),
            hourly_rate: std::env::var("OFFERLY_HOURLY_RATE")
                .ok()
                .and_then(|v| v.parse().ok()),
            ..SettingsOverrides::default()
        };
        Self {
            port,
            rates_path,
            settings,
        }
    }

    pub fn engine(&self) -> anyhow::Result<PricingEngine> {
        match &self.rates_path {
            Some(path) => PricingEngine::from_yaml_path(path)
                .with_context(|| format!("failed to load rate card {}", path.display())),
            None => Ok(PricingEngine::default()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub engine: PricingEngine,
    pub settings: SettingsOverrides,
}

impl AppState {
    pub fn new(engine: PricingEngine, settings: SettingsOverrides) -> Self {
        Self { engine, settings }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<String>),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.to_string();
        let details = match self {
            Self::Validation(details) => Some(details),
            Self::BadRequest(_) => None,
        };
        (StatusCode::BAD_REQUEST, Json(ErrorBody { error, details })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/estimate-pricing", post(estimate_handler))
        .route("/validate", post(validate_handler))
        .route("/rates", get(rates_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

pub async fn serve_from_env() -> anyhow::Result<()> {
    let config = WebConfig::from_env();
    let state = AppState::new(config.engine()?, config.settings.clone());
    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    info!(port = config.port, "offerly web listening");
    axum::serve(listener, app(state)).await?;
    Ok(())
}

async fn estimate_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProjectDraft>, JsonRejection>,
) -> Result<Json<PricingResult>, ApiError> {
    let Json(draft) = payload?;
    let overrides = match &draft.user_settings {
        Some(request) => state.settings.merged_with(request),
        None => state.settings.clone(),
    };
    let spec = draft.into_specification().map_err(|err| {
        warn!(errors = ?err.report.errors, "rejected pricing request");
        ApiError::Validation(err.report.errors)
    })?;
    Ok(Json(state.engine.calculate(&spec, &overrides)))
}

async fn validate_handler(
    payload: Result<Json<ProjectDraft>, JsonRejection>,
) -> Result<Json<ValidationReport>, ApiError> {
    let Json(draft) = payload?;
    Ok(Json(offerly_core::validate(&draft)))
}

async fn rates_handler(State(state): State<Arc<AppState>>) -> Json<RateCard> {
    Json(state.engine.rates().clone())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
