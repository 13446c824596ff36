//! Service configuration
//!
//! One explicit struct constructed at process start and passed into the
//! components that need it; no ambient settings lookup.

use alert_store::StoreConfig;
use fraud_core::FraudConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service identity
    pub service: ServiceInfo,

    /// HTTP listener
    pub http: HttpConfig,

    /// Alert storage
    pub store: StoreConfig,

    /// Event consumer
    pub consumer: ConsumerSettings,

    /// Service registry
    pub registry: RegistryConfig,

    /// Fraud-detection settings (declared surface, see fraud-core)
    pub fraud: FraudConfig,
}

/// Service identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceInfo {
    /// Service name as registered
    pub name: String,

    /// Service version
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            name: "fraud-detection-service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Listen address
    pub listen_addr: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8084".to_string(),
        }
    }
}

/// Event-consumer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumerSettings {
    /// Whether the consumer runs at all
    pub enabled: bool,

    /// NATS server URL
    pub nats_url: String,

    /// JetStream stream name
    pub stream_name: String,

    /// Subject carrying transaction-created events
    pub subject: String,

    /// Durable consumer name (consumer group)
    pub durable_name: String,
}

impl Default for ConsumerSettings {
    fn default() -> Self {
        let defaults = event_bus::ConsumerConfig::default();
        Self {
            enabled: true,
            nats_url: "nats://localhost:4222".to_string(),
            stream_name: defaults.stream_name,
            subject: defaults.subject,
            durable_name: defaults.durable_name,
        }
    }
}

impl ConsumerSettings {
    /// Transport-level consumer configuration
    pub fn to_consumer_config(&self) -> event_bus::ConsumerConfig {
        event_bus::ConsumerConfig {
            stream_name: self.stream_name.clone(),
            subject: self.subject.clone(),
            durable_name: self.durable_name.clone(),
            ..event_bus::ConsumerConfig::default()
        }
    }
}

/// Service-registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Whether registration/heartbeat runs at all
    pub enabled: bool,

    /// Registry base URL
    pub url: String,

    /// Hostname advertised to the registry
    pub instance_host: String,

    /// Port advertised to the registry
    pub instance_port: u16,

    /// Seconds between heartbeats
    pub heartbeat_interval_secs: u64,

    /// Seconds to wait after startup before the first heartbeat
    pub initial_delay_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "http://localhost:8761/eureka".to_string(),
            instance_host: "localhost".to_string(),
            instance_port: 8084,
            heartbeat_interval_secs: 30,
            initial_delay_secs: 10,
        }
    }
}

impl ServiceConfig {
    /// Load from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ServiceConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Defaults with environment-variable overrides
    pub fn from_env() -> Self {
        let mut config = ServiceConfig::default();

        if let Ok(addr) = std::env::var("FRAUD_HTTP_ADDR") {
            config.http.listen_addr = addr;
        }
        if let Ok(dir) = std::env::var("FRAUD_DATA_DIR") {
            config.store.data_dir = PathBuf::from(dir);
        }
        if let Ok(url) = std::env::var("FRAUD_NATS_URL") {
            config.consumer.nats_url = url;
        }
        if let Ok(url) = std::env::var("FRAUD_REGISTRY_URL") {
            config.registry.url = url;
        }

        config
    }
}
