//! HTTP API integration tests against the in-memory alert store

use alert_store::MemoryAlertStore;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use fraud_core::{AlertStore, FraudAlert, FraudEngine, RiskLevel};
use fraud_service::api::{router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app_with(store: Arc<dyn AlertStore>) -> Router {
    let engine = Arc::new(FraudEngine::new(store.clone()));

    router(AppState {
        engine,
        store,
        nats: None,
        service_name: "fraud-detection-service".to_string(),
    })
}

fn test_app() -> Router {
    app_with(Arc::new(MemoryAlertStore::new()))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_check(payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/fraud/check")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = test_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "UP");
    assert_eq!(body["service"], "fraud-detection-service");
    // No NATS client wired into the test app
    assert_eq!(body["nats_connected"], false);
}

#[tokio::test]
async fn test_check_high_risk_flow() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_check(json!({
            "transaction_id": "txn-61",
            "account_number": "12345678",
            "amount": 60000,
            "transaction_type": "WITHDRAWAL"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["risk_level"], "HIGH");
    assert_eq!(body["is_fraud"], false);
    assert!((body["risk_score"].as_f64().unwrap() - 0.61).abs() < 1e-9);
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 4);

    // The alert was committed before the check returned
    let response = app
        .clone()
        .oneshot(get("/api/fraud/alerts/transaction/txn-61"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let alert = body_json(response).await;
    assert_eq!(alert["transaction_id"], "txn-61");
    assert_eq!(alert["risk_level"], "HIGH");
    assert_eq!(alert["is_blocked"], false);

    let response = app.oneshot(get("/api/fraud/stats")).await.unwrap();
    let stats = body_json(response).await;
    assert_eq!(stats["total_alerts"], 1);
    assert_eq!(stats["high_alerts"], 1);
    assert_eq!(stats["critical_alerts"], 0);
    assert_eq!(stats["blocked_transactions"], 0);
    assert_eq!(stats["risk_distribution"]["medium"], 0);
}

#[tokio::test]
async fn test_check_low_risk_creates_no_alert() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_check(json!({
            "transaction_id": "txn-low",
            "account_number": "123456789012",
            "amount": 100,
            "transaction_type": "DEPOSIT"
        })))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["risk_level"], "LOW");
    assert_eq!(body["reason"], "Transaction appears normal");

    let response = app
        .oneshot(get("/api/fraud/alerts/transaction/txn-low"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_check_validation_failure() {
    let response = test_app()
        .oneshot(post_check(json!({
            "transaction_id": "",
            "account_number": "12345678",
            "amount": 100,
            "transaction_type": "DEPOSIT"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("transaction_id"));
}

#[tokio::test]
async fn test_alert_listing_and_paging() {
    let app = test_app();

    for i in 0..3 {
        app.clone()
            .oneshot(post_check(json!({
                "transaction_id": format!("txn-{}", i),
                "account_number": "12345678",
                "amount": 60000,
                "transaction_type": "WITHDRAWAL"
            })))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(get("/api/fraud/alerts?skip=1&limit=1"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let alerts = body.as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["transaction_id"], "txn-1");

    let response = app
        .oneshot(get("/api/fraud/alerts/account/12345678"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

/// Store whose counts look like an alert landed between the stats reads:
/// per-level counts run ahead of the total taken first.
struct SkewedCountStore;

#[async_trait::async_trait]
impl AlertStore for SkewedCountStore {
    async fn insert(&self, alert: FraudAlert) -> fraud_core::Result<FraudAlert> {
        Ok(alert)
    }
    async fn list_all(&self, _: usize, _: usize) -> fraud_core::Result<Vec<FraudAlert>> {
        Ok(vec![])
    }
    async fn list_by_account(&self, _: &str) -> fraud_core::Result<Vec<FraudAlert>> {
        Ok(vec![])
    }
    async fn find_by_transaction(&self, _: &str) -> fraud_core::Result<Option<FraudAlert>> {
        Ok(None)
    }
    async fn count_all(&self) -> fraud_core::Result<u64> {
        Ok(1)
    }
    async fn count_by_level(&self, level: RiskLevel) -> fraud_core::Result<u64> {
        Ok(if level == RiskLevel::High { 2 } else { 0 })
    }
    async fn count_blocked(&self) -> fraud_core::Result<u64> {
        Ok(0)
    }
}

#[tokio::test]
async fn test_stats_tolerate_counts_moving_between_reads() {
    let app = app_with(Arc::new(SkewedCountStore));

    let response = app.oneshot(get("/api/fraud/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stats = body_json(response).await;
    assert_eq!(stats["total_alerts"], 1);
    assert_eq!(stats["high_alerts"], 2);
    // Clamped to zero rather than underflowing
    assert_eq!(stats["risk_distribution"]["medium"], 0);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let response = test_app().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
