//! Alert persistence for the fraud-detection service
//!
//! Implements the [`fraud_core::AlertStore`] contract two ways:
//!
//! - [`RocksAlertStore`]: RocksDB with column families and secondary
//!   indexes, the production backend
//! - [`MemoryAlertStore`]: insertion-ordered in-memory store for tests and
//!   data-dir-less local runs
//!
//! Alerts are write-once: the store assigns `created_at`, never updates,
//! and never deletes (retention is an external concern).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod memory;
pub mod store;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use memory::MemoryAlertStore;
pub use store::RocksAlertStore;
