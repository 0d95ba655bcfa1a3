use crate::store_trait::KeyValueStore;
use ishara_core::StoreError;
use std::collections::HashMap;

pub struct StoreRegistry {
    factories: HashMap<String, fn() -> Box<dyn KeyValueStore>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register("file", || Box::new(crate::file_store::FileStore::new()));
        registry.register("memory", || {
            Box::new(crate::memory_store::MemoryStore::new())
        });
        registry
    }

    pub fn register(&mut self, name: &str, factory: fn() -> Box<dyn KeyValueStore>) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn KeyValueStore>, StoreError> {
        self.factories
            .get(name)
            .map(|f| f())
            .ok_or_else(|| StoreError::BackendNotFound(name.to_string()))
    }

    /// Create and initialise a backend in one step.
    pub fn open(
        &self,
        name: &str,
        config: toml::Value,
    ) -> Result<Box<dyn KeyValueStore>, StoreError> {
        let mut store = self.create(name)?;
        store.initialize(config)?;
        tracing::info!("opened '{}' store", store.name());
        Ok(store)
    }

    pub fn list_backends(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}
