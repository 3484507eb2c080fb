use crate::types::{LogEntry, LogKind};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Structured activity record, newest entry first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        kind: LogKind,
        message: impl Into<String>,
        meta: serde_json::Value,
        limit: usize,
    ) -> &LogEntry {
        let entry = LogEntry {
            ts: Utc::now(),
            kind,
            message: message.into(),
            meta,
        };
        tracing::debug!("{} {}", entry.kind, entry.message);

        self.entries.insert(0, entry);
        self.entries.truncate(limit.max(1));
        &self.entries[0]
    }

    /// Keeps the newest `limit` entries. Returns how many were dropped.
    pub fn truncate(&mut self, limit: usize) -> usize {
        let dropped = self.entries.len().saturating_sub(limit);
        self.entries.truncate(limit);
        dropped
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn count_of(&self, kind: LogKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
