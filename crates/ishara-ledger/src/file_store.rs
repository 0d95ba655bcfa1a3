use crate::store_trait::KeyValueStore;
use ishara_core::StoreError;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// A JSON object on disk mapping keys to string values.
///
/// Every `set` rewrites the whole file through a temp file in the same
/// directory, so readers never see a half-written document.
pub struct FileStore {
    path: Mutex<Option<PathBuf>>,
}

impl FileStore {
    pub fn new() -> Self {
        Self {
            path: Mutex::new(None),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Mutex::new(Some(path.into())),
        }
    }

    fn read_map(path: &Path) -> Result<Map<String, Value>, StoreError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(StoreError::ReadFailed(e.to_string())),
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StoreError::ReadFailed(format!(
                "{} does not hold a JSON object",
                path.display()
            ))),
            Err(e) => Err(StoreError::ReadFailed(e.to_string())),
        }
    }

    fn write_map(path: &Path, map: &Map<String, Value>) -> Result<(), StoreError> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        let encoded =
            serde_json::to_string_pretty(map).map_err(|e| StoreError::Encode(e.to_string()))?;
        let mut temp =
            NamedTempFile::new_in(parent).map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        temp.write_all(encoded.as_bytes())
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        temp.persist(path)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        Ok(())
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    fn initialize(&mut self, config: toml::Value) -> Result<(), StoreError> {
        let path = config
            .get("path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                StoreError::InitializationFailed("missing 'path' in config".to_string())
            })?;
        *self
            .path
            .lock()
            .map_err(|e| StoreError::InitializationFailed(e.to_string()))? =
            Some(PathBuf::from(path));
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let guard = self
            .path
            .lock()
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;
        let path = guard
            .as_ref()
            .ok_or_else(|| StoreError::ReadFailed("not initialized".to_string()))?;

        let map = Self::read_map(path)?;
        Ok(map.get(key).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // held across read-modify-write so concurrent sets don't drop keys
        let guard = self
            .path
            .lock()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        let path = guard
            .as_ref()
            .ok_or_else(|| StoreError::WriteFailed("not initialized".to_string()))?;

        let mut map = match Self::read_map(path) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("discarding unreadable store file {:?}: {e}", path);
                Map::new()
            }
        };
        map.insert(key.to_string(), Value::String(value.to_string()));
        Self::write_map(path, &map)
    }
}
