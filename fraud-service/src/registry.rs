//! Service-registry client
//!
//! Eureka-compatible REST registration and heartbeat, run as an independent
//! periodic task with its own cancellation token. Registration is best
//! effort: the service starts and serves traffic even when the registry is
//! unreachable.

use crate::config::RegistryConfig;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Registry client
pub struct RegistryClient {
    http: reqwest::Client,
    config: RegistryConfig,
    app_name: String,
    instance_id: String,
}

impl RegistryClient {
    /// Create a client for one service instance
    pub fn new(config: RegistryConfig, app_name: impl Into<String>) -> Self {
        let app_name = app_name.into();
        let instance_id = format!(
            "{}:{}:{}",
            config.instance_host, app_name, config.instance_port
        );

        Self {
            http: reqwest::Client::new(),
            config,
            app_name,
            instance_id,
        }
    }

    /// Register this instance with the registry
    pub async fn register(&self) -> reqwest::Result<()> {
        let url = format!("{}/apps/{}", self.config.url, self.app_name);
        let base = format!(
            "http://{}:{}",
            self.config.instance_host, self.config.instance_port
        );

        let payload = serde_json::json!({
            "instance": {
                "instanceId": self.instance_id,
                "app": self.app_name.to_uppercase(),
                "hostName": self.config.instance_host,
                "ipAddr": "127.0.0.1",
                "status": "UP",
                "port": { "$": self.config.instance_port, "@enabled": "true" },
                "healthCheckUrl": format!("{}/health", base),
                "statusPageUrl": format!("{}/health", base),
                "homePageUrl": format!("{}/", base),
                "dataCenterInfo": {
                    "@class": "com.netflix.appinfo.InstanceInfo$DefaultDataCenterInfo",
                    "name": "MyOwn"
                }
            }
        });

        self.http
            .post(&url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        info!(app = %self.app_name, "Registered with service registry");
        Ok(())
    }

    /// Renew this instance's lease
    async fn heartbeat(&self) -> reqwest::Result<()> {
        let url = format!(
            "{}/apps/{}/{}",
            self.config.url, self.app_name, self.instance_id
        );

        self.http.put(&url).send().await?.error_for_status()?;

        debug!(app = %self.app_name, "Heartbeat sent");
        Ok(())
    }

    /// Heartbeat loop: initial delay, then one renewal per interval
    ///
    /// A failed heartbeat is retried by re-registering on the next tick, so
    /// a registry restart picks the instance back up.
    pub async fn run(self, cancel: CancellationToken) {
        let initial = Duration::from_secs(self.config.initial_delay_secs);
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(initial) => {}
        }

        let mut interval =
            tokio::time::interval(Duration::from_secs(self.config.heartbeat_interval_secs));

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Registry heartbeat stopped");
                    return;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.heartbeat().await {
                        warn!("Heartbeat failed: {}; re-registering", e);
                        if let Err(e) = self.register().await {
                            warn!("Re-registration failed: {}", e);
                        }
                    }
                }
            }
        }
    }
}
