//! Storage configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Alert store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Data directory for RocksDB
    pub data_dir: PathBuf,

    /// Write buffer size (MB)
    pub write_buffer_size_mb: usize,

    /// Max background jobs (compaction + flush)
    pub max_background_jobs: i32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data/fraud-alerts"),
            write_buffer_size_mb: 64,
            max_background_jobs: 2,
        }
    }
}
