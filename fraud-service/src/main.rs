//! Fraud detection service binary

use alert_store::RocksAlertStore;
use anyhow::Context;
use event_bus::{NatsClient, TransactionConsumer};
use fraud_core::FraudEngine;
use fraud_service::{api, FraudEventHandler, RegistryClient, ServiceConfig};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::var("FRAUD_CONFIG") {
        Ok(path) => ServiceConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        Err(_) => ServiceConfig::from_env(),
    };

    info!(
        service = %config.service.name,
        version = %config.service.version,
        "Starting fraud detection service"
    );

    let store = Arc::new(RocksAlertStore::open(&config.store).context("Failed to open alert store")?);
    let engine = Arc::new(FraudEngine::new(store.clone()));

    let cancel = CancellationToken::new();

    // Transaction-event consumer. Connection failure disables the event
    // path but not the HTTP API; /health reports the connection state.
    let nats = if config.consumer.enabled {
        match NatsClient::connect(&config.consumer.nats_url).await {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                error!("Could not connect to NATS, event path disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    if let Some(client) = nats.clone() {
        let handler = Arc::new(FraudEventHandler::new(engine.clone()));
        let consumer = TransactionConsumer::new(client, config.consumer.to_consumer_config());
        let consumer_cancel = cancel.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = consumer_cancel.cancelled() => {}
                result = consumer.run(handler) => {
                    if let Err(e) = result {
                        error!("Transaction consumer stopped: {}", e);
                    }
                }
            }
        });
    }

    // Registry heartbeat
    if config.registry.enabled {
        let registry = RegistryClient::new(config.registry.clone(), config.service.name.clone());
        if let Err(e) = registry.register().await {
            warn!("Could not register with service registry: {}", e);
        }
        tokio::spawn(registry.run(cancel.clone()));
    }

    // HTTP API
    let state = api::AppState {
        engine,
        store,
        nats,
        service_name: config.service.name.clone(),
    };
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.http.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.http.listen_addr))?;
    info!(addr = %config.http.listen_addr, "HTTP API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cancel.cancel();
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
