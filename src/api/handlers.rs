//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::metrics::{self, LatencyTimer};
use crate::store::{LogKind, Record, RecordStore};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Record logs.
    pub store: Arc<RecordStore>,
    /// Prometheus render handle, if a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state with an empty store and no metrics handle.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RecordStore::new()),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Echo response for a successful append.
#[derive(Debug, Serialize)]
pub struct AddedResponse {
    /// Confirmation message.
    pub message: &'static str,
    /// The record exactly as submitted.
    pub data: Record,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Prometheus exposition. Empty when no recorder is installed.
pub async fn metrics_text(State(state): State<AppState>) -> impl IntoResponse {
    let body = state
        .metrics
        .as_ref()
        .map(PrometheusHandle::render)
        .unwrap_or_default();

    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}

async fn append_record(
    state: &AppState,
    kind: LogKind,
    payload: Result<Json<Record>, JsonRejection>,
) -> Result<(StatusCode, Json<AddedResponse>), ApiError> {
    let Json(record) = payload.map_err(|rejection| {
        warn!(log = %kind, status = %rejection.status(), "Rejected request body: {}", rejection);
        metrics::inc_body_rejections(kind);
        ApiError::from(rejection)
    })?;

    let len = state.store.append(kind, record.clone()).await;
    info!(log = %kind, len, "Record added");

    Ok((
        StatusCode::CREATED,
        Json(AddedResponse {
            message: kind.added_message(),
            data: record,
        }),
    ))
}

async fn list_records(state: &AppState, kind: LogKind) -> Json<Vec<Record>> {
    Json(state.store.list(kind).await)
}

/// `POST /add_chemo_session`
pub async fn add_chemo_session(
    State(state): State<AppState>,
    payload: Result<Json<Record>, JsonRejection>,
) -> Result<(StatusCode, Json<AddedResponse>), ApiError> {
    let _timer = LatencyTimer::new("/add_chemo_session");
    append_record(&state, LogKind::ChemoSession, payload).await
}

/// `GET /get_chemo_sessions`
pub async fn get_chemo_sessions(State(state): State<AppState>) -> Json<Vec<Record>> {
    let _timer = LatencyTimer::new("/get_chemo_sessions");
    list_records(&state, LogKind::ChemoSession).await
}

/// `POST /add_medicine_reminder`
pub async fn add_medicine_reminder(
    State(state): State<AppState>,
    payload: Result<Json<Record>, JsonRejection>,
) -> Result<(StatusCode, Json<AddedResponse>), ApiError> {
    let _timer = LatencyTimer::new("/add_medicine_reminder");
    append_record(&state, LogKind::MedicineReminder, payload).await
}

/// `GET /get_medicine_reminders`
pub async fn get_medicine_reminders(State(state): State<AppState>) -> Json<Vec<Record>> {
    let _timer = LatencyTimer::new("/get_medicine_reminders");
    list_records(&state, LogKind::MedicineReminder).await
}
