//! HTTP API
//!
//! Thin transport over the fraud engine and the alert read side. Route
//! shapes and payloads match the service's published REST contract.

use crate::metrics;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use event_bus::NatsClient;
use fraud_core::{AlertStore, Error, FraudCheckResult, FraudEngine, RiskLevel, TransactionCheck};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// Fraud-check engine
    pub engine: Arc<FraudEngine>,

    /// Alert read side
    pub store: Arc<dyn AlertStore>,

    /// NATS connection, when the event path is enabled
    pub nats: Option<Arc<NatsClient>>,

    /// Service name reported by /health
    pub service_name: String,
}

/// API error mapped onto HTTP status codes
pub enum ApiError {
    /// Malformed request (400)
    Validation(String),

    /// Missing resource (404)
    NotFound(String),

    /// Everything else (500)
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "timestamp": chrono::Utc::now(),
            })),
        )
            .into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidInput(msg) => ApiError::Validation(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Pagination query parameters
#[derive(Debug, Deserialize)]
pub struct Pagination {
    /// Alerts to skip
    #[serde(default)]
    pub skip: usize,

    /// Maximum alerts to return
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    100
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/fraud/check", post(check_fraud))
        .route("/api/fraud/alerts", get(get_all_alerts))
        .route("/api/fraud/alerts/account/:account_number", get(get_alerts_by_account))
        .route(
            "/api/fraud/alerts/transaction/:transaction_id",
            get(get_alert_by_transaction),
        )
        .route("/api/fraud/stats", get(get_stats))
        .route("/metrics", get(export_metrics))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "UP",
        "service": state.service_name,
        "version": env!("CARGO_PKG_VERSION"),
        "nats_connected": state.nats.as_ref().map(|c| c.is_connected()).unwrap_or(false),
    }))
}

async fn check_fraud(
    State(state): State<AppState>,
    Json(check): Json<TransactionCheck>,
) -> Result<Json<FraudCheckResult>, ApiError> {
    info!(transaction_id = %check.transaction_id, "Fraud check request");

    let timer = metrics::CHECK_DURATION.start_timer();
    let result = state.engine.check_transaction(check).await?;
    timer.observe_duration();

    metrics::CHECKS_TOTAL
        .with_label_values(&[result.risk_level.as_str()])
        .inc();
    if result.risk_level.is_alertable() {
        metrics::ALERTS_CREATED_TOTAL
            .with_label_values(&[result.risk_level.as_str()])
            .inc();
        if result.risk_level == RiskLevel::Critical {
            metrics::BLOCKED_TOTAL.inc();
        }
    }

    Ok(Json(result))
}

async fn get_all_alerts(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<fraud_core::FraudAlert>>, ApiError> {
    let alerts = state.store.list_all(page.skip, page.limit).await?;
    Ok(Json(alerts))
}

async fn get_alerts_by_account(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Result<Json<Vec<fraud_core::FraudAlert>>, ApiError> {
    let alerts = state.store.list_by_account(&account_number).await?;
    Ok(Json(alerts))
}

async fn get_alert_by_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> Result<Json<fraud_core::FraudAlert>, ApiError> {
    match state.store.find_by_transaction(&transaction_id).await? {
        Some(alert) => Ok(Json(alert)),
        None => Err(ApiError::NotFound("Alert not found".to_string())),
    }
}

async fn get_stats(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let total = state.store.count_all().await?;
    let critical = state.store.count_by_level(RiskLevel::Critical).await?;
    let high = state.store.count_by_level(RiskLevel::High).await?;
    let blocked = state.store.count_blocked().await?;

    Ok(Json(serde_json::json!({
        "total_alerts": total,
        "critical_alerts": critical,
        "high_alerts": high,
        "blocked_transactions": blocked,
        "risk_distribution": {
            "critical": critical,
            "high": high,
            // Everything that is neither critical nor high. Saturating: the
            // four counts are separate reads, so an alert landing between
            // them can make critical + high exceed total.
            "medium": total.saturating_sub(critical).saturating_sub(high),
        },
    })))
}

async fn export_metrics() -> Result<String, ApiError> {
    metrics::export().map_err(|e| ApiError::Internal(format!("Failed to export metrics: {}", e)))
}
