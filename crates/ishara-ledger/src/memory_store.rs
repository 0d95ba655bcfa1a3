use crate::store_trait::KeyValueStore;
use ishara_core::StoreError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-process store. Nothing survives the process, but writes can be made
/// to fail on demand to mimic a full or locked storage area.
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
    write_count: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
            write_count: AtomicUsize::new(0),
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Successful writes so far.
    pub fn write_count(&self) -> usize {
        self.write_count.load(Ordering::Relaxed)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn initialize(&mut self, config: toml::Value) -> Result<(), StoreError> {
        if let Some(fail) = config.get("fail_writes").and_then(|v| v.as_bool()) {
            self.set_fail_writes(fail);
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self
            .values
            .lock()
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StoreError::WriteFailed("quota exceeded".to_string()));
        }
        let mut values = self
            .values
            .lock()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        self.write_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
