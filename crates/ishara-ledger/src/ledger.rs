use crate::store_trait::KeyValueStore;
use chrono::format::{Item, StrftimeItems};
use chrono::Local;
use ishara_core::{StoreError, TrainedSignRecord};
use std::sync::Arc;

pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

/// Append-only list of trained words, newest first, written through to a
/// [`KeyValueStore`] on every change.
///
/// The in-memory list is authoritative: load and write failures are logged
/// and never reach the caller.
pub struct SignLedger {
    store: Arc<dyn KeyValueStore>,
    key: String,
    time_format: String,
    records: Vec<TrainedSignRecord>,
}

impl SignLedger {
    pub fn load(store: Arc<dyn KeyValueStore>, key: &str, time_format: &str) -> Self {
        let records = match store.get(key) {
            Ok(Some(raw)) => decode(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(store = %store.name(), "failed to read signs: {e}");
                Vec::new()
            }
        };
        tracing::info!("loaded {} trained sign(s) from '{}'", records.len(), key);

        Self {
            store,
            key: key.to_string(),
            time_format: checked_time_format(time_format),
            records,
        }
    }

    /// Record `word` at the current local time. Blank words are ignored.
    pub fn append(&mut self, word: &str) -> Option<TrainedSignRecord> {
        let recorded_at = Local::now().format(&self.time_format).to_string();
        self.append_recorded(word, recorded_at)
    }

    fn append_recorded(&mut self, word: &str, recorded_at: String) -> Option<TrainedSignRecord> {
        let word = word.trim();
        if word.is_empty() {
            return None;
        }
        let record = TrainedSignRecord {
            word: word.to_string(),
            recorded_at,
        };
        self.records.insert(0, record.clone());
        tracing::info!(word = %record.word, "trained sign saved");

        if let Err(e) = self.persist() {
            tracing::warn!(store = %self.store.name(), "failed to persist signs: {e}");
        }
        Some(record)
    }

    fn persist(&self) -> Result<(), StoreError> {
        let encoded =
            serde_json::to_string(&self.records).map_err(|e| StoreError::Encode(e.to_string()))?;
        self.store.set(&self.key, &encoded)
    }

    /// Records, newest first.
    pub fn records(&self) -> &[TrainedSignRecord] {
        &self.records
    }

    pub fn words(&self) -> Vec<String> {
        self.records.iter().map(|r| r.word.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn decode(raw: &str) -> Vec<TrainedSignRecord> {
    match serde_json::from_str::<Vec<TrainedSignRecord>>(raw) {
        Ok(records) => records
            .into_iter()
            .filter(|r| !r.word.trim().is_empty())
            .collect(),
        Err(e) => {
            tracing::warn!("ignoring malformed sign list: {e}");
            Vec::new()
        }
    }
}

fn checked_time_format(format: &str) -> String {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        tracing::warn!(
            "invalid time format {:?}, falling back to {:?}",
            format,
            DEFAULT_TIME_FORMAT
        );
        return DEFAULT_TIME_FORMAT.to_string();
    }
    format.to_string()
}
