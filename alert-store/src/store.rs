//! RocksDB-backed alert store
//!
//! # Column Families
//!
//! - `alerts` - alert records (key: alert_id, value: JSON)
//! - `order` - insertion sequence (key: big-endian u64, value: alert_id)
//! - `idx_account` - account index (key: account || 0x00 || seq)
//! - `idx_txn` - transaction index (key: transaction_id || 0x00 || seq)
//!
//! The `order` column family makes insertion order durable: paged listing
//! walks it forward, and the transaction index embeds the sequence so the
//! first match for a duplicated transaction_id is the earliest insert.

use crate::{
    config::StoreConfig,
    error::{Error, Result},
};
use async_trait::async_trait;
use chrono::Utc;
use fraud_core::{AlertStore, FraudAlert, RiskLevel};
use rocksdb::{BoundColumnFamily, ColumnFamilyDescriptor, IteratorMode, Options, WriteBatch, DB};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Column family names
const CF_ALERTS: &str = "alerts";
const CF_ORDER: &str = "order";
const CF_IDX_ACCOUNT: &str = "idx_account";
const CF_IDX_TXN: &str = "idx_txn";

/// Separator between a string key and its sequence suffix
const KEY_SEP: u8 = 0x00;

/// RocksDB alert store
pub struct RocksAlertStore {
    db: Arc<DB>,
    next_seq: AtomicU64,
}

impl RocksAlertStore {
    /// Open or create the database
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let path = &config.data_dir;
        std::fs::create_dir_all(path)?;

        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);
        db_opts.set_write_buffer_size(config.write_buffer_size_mb * 1024 * 1024);
        db_opts.set_max_background_jobs(config.max_background_jobs);

        let cf_descriptors = vec![
            ColumnFamilyDescriptor::new(CF_ALERTS, Self::cf_options()),
            ColumnFamilyDescriptor::new(CF_ORDER, Self::cf_options()),
            ColumnFamilyDescriptor::new(CF_IDX_ACCOUNT, Self::cf_options()),
            ColumnFamilyDescriptor::new(CF_IDX_TXN, Self::cf_options()),
        ];

        let db = DB::open_cf_descriptors(&db_opts, path, cf_descriptors)?;
        let store = Self {
            db: Arc::new(db),
            next_seq: AtomicU64::new(0),
        };

        let next = store.recover_next_seq()?;
        store.next_seq.store(next, Ordering::SeqCst);

        tracing::info!(path = %path.display(), next_seq = next, "Opened alert store");

        Ok(store)
    }

    fn cf_options() -> Options {
        let mut opts = Options::default();
        opts.set_compression_type(rocksdb::DBCompressionType::Lz4);
        opts
    }

    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| Error::Storage(format!("Column family {} not found", name)))
    }

    /// Highest stored sequence + 1, recovered at open
    fn recover_next_seq(&self) -> Result<u64> {
        let cf = self.cf(CF_ORDER)?;
        let mut iter = self.db.iterator_cf(&cf, IteratorMode::End);

        match iter.next() {
            Some(item) => {
                let (key, _) = item?;
                let bytes: [u8; 8] = key
                    .as_ref()
                    .try_into()
                    .map_err(|_| Error::Storage("Malformed sequence key".to_string()))?;
                Ok(u64::from_be_bytes(bytes) + 1)
            }
            None => Ok(0),
        }
    }

    fn index_key(prefix: &str, seq: u64) -> Vec<u8> {
        let mut key = Vec::with_capacity(prefix.len() + 9);
        key.extend_from_slice(prefix.as_bytes());
        key.push(KEY_SEP);
        key.extend_from_slice(&seq.to_be_bytes());
        key
    }

    fn index_prefix(prefix: &str) -> Vec<u8> {
        let mut key = Vec::with_capacity(prefix.len() + 1);
        key.extend_from_slice(prefix.as_bytes());
        key.push(KEY_SEP);
        key
    }

    /// Write one alert atomically across all column families
    pub fn put_alert(&self, mut alert: FraudAlert) -> Result<FraudAlert> {
        // Server-assigned write timestamp
        alert.created_at = Utc::now();

        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let value = serde_json::to_vec(&alert)?;

        let cf_alerts = self.cf(CF_ALERTS)?;
        let cf_order = self.cf(CF_ORDER)?;
        let cf_account = self.cf(CF_IDX_ACCOUNT)?;
        let cf_txn = self.cf(CF_IDX_TXN)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_alerts, alert.alert_id.as_bytes(), &value);
        batch.put_cf(&cf_order, seq.to_be_bytes(), alert.alert_id.as_bytes());
        batch.put_cf(
            &cf_account,
            Self::index_key(&alert.account_number, seq),
            alert.alert_id.as_bytes(),
        );
        batch.put_cf(
            &cf_txn,
            Self::index_key(&alert.transaction_id, seq),
            alert.alert_id.as_bytes(),
        );

        self.db.write(batch)?;

        tracing::debug!(
            alert_id = %alert.alert_id,
            transaction_id = %alert.transaction_id,
            seq,
            "Alert persisted"
        );

        Ok(alert)
    }

    /// Get an alert by its ID
    pub fn get_alert(&self, alert_id: Uuid) -> Result<Option<FraudAlert>> {
        let cf = self.cf(CF_ALERTS)?;

        match self.db.get_cf(&cf, alert_id.as_bytes())? {
            Some(value) => Ok(Some(serde_json::from_slice(&value)?)),
            None => Ok(None),
        }
    }

    fn get_alert_by_raw_id(&self, raw: &[u8]) -> Result<FraudAlert> {
        let cf = self.cf(CF_ALERTS)?;
        let value = self
            .db
            .get_cf(&cf, raw)?
            .ok_or_else(|| Error::Storage("Dangling alert index entry".to_string()))?;
        Ok(serde_json::from_slice(&value)?)
    }

    /// Page through alerts in insertion order
    pub fn scan_all(&self, skip: usize, limit: usize) -> Result<Vec<FraudAlert>> {
        let cf = self.cf(CF_ORDER)?;

        let mut alerts = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start).skip(skip) {
            if alerts.len() >= limit {
                break;
            }
            let (_, alert_id) = item?;
            alerts.push(self.get_alert_by_raw_id(&alert_id)?);
        }

        Ok(alerts)
    }

    /// All alerts for one account, in insertion order
    pub fn scan_by_account(&self, account_number: &str) -> Result<Vec<FraudAlert>> {
        let cf = self.cf(CF_IDX_ACCOUNT)?;
        let prefix = Self::index_prefix(account_number);

        let mut alerts = Vec::new();
        for item in self.db.prefix_iterator_cf(&cf, &prefix) {
            let (key, alert_id) = item?;
            if !key.starts_with(&prefix) {
                break;
            }
            alerts.push(self.get_alert_by_raw_id(&alert_id)?);
        }

        Ok(alerts)
    }

    /// Earliest alert recorded for a transaction, if any
    pub fn scan_by_transaction(&self, transaction_id: &str) -> Result<Option<FraudAlert>> {
        let cf = self.cf(CF_IDX_TXN)?;
        let prefix = Self::index_prefix(transaction_id);

        for item in self.db.prefix_iterator_cf(&cf, &prefix) {
            let (key, alert_id) = item?;
            if !key.starts_with(&prefix) {
                break;
            }
            return Ok(Some(self.get_alert_by_raw_id(&alert_id)?));
        }

        Ok(None)
    }

    /// Total number of stored alerts
    pub fn count(&self) -> Result<u64> {
        let cf = self.cf(CF_ORDER)?;

        let mut count = 0u64;
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            item?;
            count += 1;
        }
        Ok(count)
    }

    /// Count alerts matching a predicate (full scan, reporting-path only)
    fn count_matching(&self, predicate: impl Fn(&FraudAlert) -> bool) -> Result<u64> {
        let cf = self.cf(CF_ALERTS)?;

        let mut count = 0u64;
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item?;
            let alert: FraudAlert = serde_json::from_slice(&value)?;
            if predicate(&alert) {
                count += 1;
            }
        }
        Ok(count)
    }
}

#[async_trait]
impl AlertStore for RocksAlertStore {
    async fn insert(&self, alert: FraudAlert) -> fraud_core::Result<FraudAlert> {
        Ok(self.put_alert(alert)?)
    }

    async fn list_all(&self, skip: usize, limit: usize) -> fraud_core::Result<Vec<FraudAlert>> {
        Ok(self.scan_all(skip, limit)?)
    }

    async fn list_by_account(&self, account_number: &str) -> fraud_core::Result<Vec<FraudAlert>> {
        Ok(self.scan_by_account(account_number)?)
    }

    async fn find_by_transaction(
        &self,
        transaction_id: &str,
    ) -> fraud_core::Result<Option<FraudAlert>> {
        Ok(self.scan_by_transaction(transaction_id)?)
    }

    async fn count_all(&self) -> fraud_core::Result<u64> {
        Ok(self.count()?)
    }

    async fn count_by_level(&self, level: RiskLevel) -> fraud_core::Result<u64> {
        Ok(self.count_matching(|a| a.risk_level == level)?)
    }

    async fn count_blocked(&self) -> fraud_core::Result<u64> {
        Ok(self.count_matching(|a| a.is_blocked)?)
    }
}
