//! HTTP API for the Price Engine.
//!
//! This module exposes a minimal REST API around the pricing engine
//! using the [`axum`](https://crates.io/crates/axum) framework.  The
//! API allows clients to quote a single project, quote a batch of
//! projects, and read or replace the billing settings held in memory.
//! Durable persistence of settings and projects belongs to the
//! surrounding application, as do authentication and sessions; this
//! surface is the thin JSON boundary in front of the engine only.

use crate::engine::{calculate_project_price, run_quotes};
use crate::models::{DateRange, PriceResult, ProjectSpec, QuoteRunInput, RateConfig, WeekdayName};
use crate::settings::{load_settings_from_file, BillingSettings, DiscountPolicy, PixDiscount};
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

/// Application state shared across requests.
pub struct AppState {
    /// The billing settings consulted for defaults and the PIX
    /// discount percentage.  Replaced wholesale by `PUT /api/settings`.
    pub settings: RwLock<BillingSettings>,
    /// The active discount policy.
    pub policy: Arc<dyn DiscountPolicy>,
}

/// Build the API router around the given settings.  Returns the
/// router and a handle to the state.
pub fn build_router(settings: BillingSettings) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        settings: RwLock::new(settings),
        policy: Arc::new(PixDiscount),
    });
    let router = Router::new()
        .route("/api/quote", post(quote_handler))
        .route("/api/quotes", post(quotes_handler))
        .route("/api/settings", get(get_settings_handler).put(put_settings_handler))
        .with_state(state.clone());
    (router, state)
}

/// Handler for POST /api/quote: price a single project.
async fn quote_handler(
    State(app_state): State<Arc<AppState>>,
    Json(project): Json<ProjectSpec>,
) -> Json<PriceResult> {
    let settings = app_state.settings.read().await;
    let range = DateRange::new(project.start_date, project.end_date);
    let working_days: HashSet<WeekdayName> = project.working_days.iter().copied().collect();
    let rate = RateConfig {
        hourly_rate: project.hourly_rate.unwrap_or(settings.default_hourly_rate),
        hours_per_day: project
            .hours_per_day
            .unwrap_or(settings.default_hours_per_day),
    };
    let pct = app_state
        .policy
        .discount_percentage(project.payment_method, &settings);
    Json(calculate_project_price(&range, &working_days, &rate, pct))
}

/// Handler for POST /api/quotes: price a batch of projects.
async fn quotes_handler(
    State(app_state): State<Arc<AppState>>,
    Json(input): Json<QuoteRunInput>,
) -> impl IntoResponse {
    // Clone the settings under the read lock for this request.
    let settings = app_state.settings.read().await.clone();
    match run_quotes(input, &settings, app_state.policy.as_ref()) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => {
            error!("quote run failed: {err}");
            let body = Json(serde_json::json!({"error": err.to_string()}));
            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    }
}

/// Handler for GET /api/settings.
async fn get_settings_handler(State(app_state): State<Arc<AppState>>) -> Json<BillingSettings> {
    Json(app_state.settings.read().await.clone())
}

/// Handler for PUT /api/settings: replace the in-memory settings.
async fn put_settings_handler(
    State(app_state): State<Arc<AppState>>,
    Json(new_settings): Json<BillingSettings>,
) -> Json<BillingSettings> {
    let mut settings = app_state.settings.write().await;
    *settings = new_settings;
    Json(settings.clone())
}

/// Launch the API server.  Settings are loaded from `settings_path`
/// when given, falling back to [`BillingSettings::default`] when the
/// file is absent or unreadable.  Blocks until the server terminates.
pub async fn serve(addr: &str, settings_path: Option<&Path>) -> Result<()> {
    let settings = match settings_path {
        Some(path) => match load_settings_from_file(path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("falling back to default settings: {err}");
                BillingSettings::default()
            }
        },
        None => BillingSettings::default(),
    };
    let (router, _state) = build_router(settings);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("server listening on {addr}");
    axum::serve(listener, router).await?;
    Ok(())
}
