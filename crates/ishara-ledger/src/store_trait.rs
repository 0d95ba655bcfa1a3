use ishara_core::StoreError;

/// A string key-value store, the local stand-in for browser storage.
///
/// Implementations are created through [`StoreRegistry`](crate::StoreRegistry)
/// and configured once with backend-specific TOML.
pub trait KeyValueStore: Send + Sync {
    /// Returns the backend name (e.g. `"file"`, `"memory"`).
    fn name(&self) -> &str;
    /// One-time initialisation with backend-specific configuration.
    fn initialize(&mut self, config: toml::Value) -> Result<(), StoreError>;
    /// Read the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
