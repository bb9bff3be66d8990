//! Append-only record logs and the store that owns them.

use tokio::sync::RwLock;
use tracing::debug;

use super::types::{LogKind, Record};
use crate::metrics;

/// An append-only sequence of records in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RecordLog {
    records: Vec<Record>,
}

impl RecordLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, returning the new length.
    pub fn push(&mut self, record: Record) -> usize {
        self.records.push(record);
        self.records.len()
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Owner of both logs, each behind its own lock.
///
/// Appends to the same log are serialized by that log's lock, so the stored
/// order is the order in which writers acquired it. The two logs never
/// contend with each other.
#[derive(Debug, Default)]
pub struct RecordStore {
    chemo_sessions: RwLock<RecordLog>,
    medicine_reminders: RwLock<RecordLog>,
}

impl RecordStore {
    /// Create a store with two empty logs.
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self, kind: LogKind) -> &RwLock<RecordLog> {
        match kind {
            LogKind::ChemoSession => &self.chemo_sessions,
            LogKind::MedicineReminder => &self.medicine_reminders,
        }
    }

    /// Append `record` to the end of the `kind` log. Returns the new length.
    ///
    /// The size gauge is updated while the write lock is held.
    pub async fn append(&self, kind: LogKind, record: Record) -> usize {
        let mut log = self.log(kind).write().await;
        let len = log.push(record);
        metrics::record_append(kind, len);
        drop(log);

        debug!(log = %kind, len, "Record appended");
        len
    }

    /// Snapshot of the `kind` log in insertion order.
    pub async fn list(&self, kind: LogKind) -> Vec<Record> {
        self.log(kind).read().await.records().to_vec()
    }

    /// Number of records in the `kind` log.
    pub async fn len(&self, kind: LogKind) -> usize {
        self.log(kind).read().await.len()
    }
}
