// HTTP routes: report endpoints + version + a minimal human page

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Local;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::bandwidth_repo::BandwidthRepo;
use crate::models::{BucketReport, TimedEvent};
use crate::report;
use crate::version::{NAME, VERSION};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) repo: Arc<BandwidthRepo>,
}

pub fn app(repo: Arc<BandwidthRepo>) -> Router {
    let state = AppState { repo };
    Router::new()
        .route("/", get(root_handler)) // GET /
        .route("/version", get(version_handler)) // GET /version
        .route("/all", get(all_handler)) // GET /all
        .route("/week", get(week_handler)) // GET /week
        .route("/month", get(month_handler)) // GET /month
        .route("/year", get(year_handler)) // GET /year
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Store/report failures map to a terse 500; details go to the log only.
struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET / — plain-text summary of the last week of measurements.
async fn root_handler(State(state): State<AppState>) -> Result<String, AppError> {
    let events = report::week_events(&state.repo, Local::now()).await?;
    let mut out = format!(
        "{} v{}: {} measurements in the last 7 days\n",
        NAME,
        VERSION,
        events.len()
    );
    if let Some(last) = events.last() {
        out.push_str(&format!(
            "latest ({}): ping {:.1} ms, up {:.2} Mb/s, down {:.2} Mb/s via {}\n",
            last.test_time.format("%Y-%m-%d %H:%M:%S"),
            last.ping,
            last.up_mb,
            last.down_mb,
            last.host
        ));
    }
    Ok(out)
}

/// GET /all — every recorded event, raw.
async fn all_handler(State(state): State<AppState>) -> Result<Json<Vec<TimedEvent>>, AppError> {
    Ok(Json(report::all_events(&state.repo, Local::now()).await?))
}

/// GET /week — the rolling last-7-days window, raw.
async fn week_handler(State(state): State<AppState>) -> Result<Json<Vec<TimedEvent>>, AppError> {
    Ok(Json(report::week_events(&state.repo, Local::now()).await?))
}

/// GET /month — 31 daily bucket reports, oldest first.
async fn month_handler(State(state): State<AppState>) -> Result<Json<Vec<BucketReport>>, AppError> {
    Ok(Json(report::month_report(&state.repo, Local::now()).await?))
}

/// GET /year — 12 monthly bucket reports, oldest first.
async fn year_handler(State(state): State<AppState>) -> Result<Json<Vec<BucketReport>>, AppError> {
    Ok(Json(report::year_report(&state.repo, Local::now()).await?))
}
