use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::header,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use wqm_core::{DateFilter, Metric, Submission};
use wqm_data::ChartSeries;
use wqm_db::{export_csv, MeasurementStore};

use super::{run_store, AppError, AppState};
use crate::dashboard::{Outcome, View};

const DASHBOARD_HTML: &str = include_str!("../../assets/dashboard.html");

// --- Request Structs ---

/// `?from=YYYY-MM-DD&to=YYYY-MM-DD`, either optional.
#[derive(Deserialize, Default, Debug)]
pub struct RangeParams {
    from: Option<String>,
    to: Option<String>,
}

impl RangeParams {
    fn filter(&self) -> Result<DateFilter, AppError> {
        Ok(DateFilter::from_params(self.from.as_deref(), self.to.as_deref())?)
    }
}

#[derive(Deserialize, Debug)]
pub struct SubmitRequest {
    #[serde(flatten)]
    submission: Submission,
    #[serde(flatten)]
    range: RangeParams,
}

#[derive(Deserialize, Debug)]
pub struct DeleteRequest {
    #[serde(default)]
    ids: Vec<i64>,
    #[serde(flatten)]
    range: RangeParams,
}

// --- Route Handlers ---

async fn index_handler() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn view_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<RangeParams>,
) -> Result<Json<View>, AppError> {
    let filter = params.filter()?;
    let view = run_store(&app_state, move |d| d.refresh(&filter)).await?;
    Ok(Json(view))
}

async fn series_handler(
    State(app_state): State<Arc<AppState>>,
    Path(metric): Path<String>,
    Query(params): Query<RangeParams>,
) -> Result<Json<ChartSeries>, AppError> {
    let metric: Metric = metric.parse()?;
    let filter = params.filter()?;
    let chart = run_store(&app_state, move |d| d.series(metric, &filter)).await?;
    Ok(Json(chart))
}

async fn submit_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<Outcome>, AppError> {
    let Json(payload) = payload?;
    let filter = payload.range.filter()?;
    let submission = payload.submission;
    let outcome = run_store(&app_state, move |d| d.submit(&submission, &filter)).await?;
    Ok(Json(outcome))
}

async fn delete_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<Json<Outcome>, AppError> {
    let Json(payload) = payload?;
    let filter = payload.range.filter()?;
    let ids = payload.ids;
    let outcome = run_store(&app_state, move |d| d.delete_selected(&ids, &filter)).await?;
    Ok(Json(outcome))
}

async fn export_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = params.filter()?;
    let csv = run_store(&app_state, move |d| export_csv(&d.store().query(&filter)?)).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"mediciones.csv\"",
            ),
        ],
        csv,
    ))
}

pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/view", get(view_handler))
        .route("/api/series/{metric}", get(series_handler))
        .route("/api/measurements", post(submit_handler))
        .route("/api/measurements/delete", post(delete_handler))
        .route("/api/export.csv", get(export_handler))
        .with_state(app_state)
}
