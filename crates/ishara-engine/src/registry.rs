use crate::pose_trait::PoseEstimator;
use ishara_core::PoseError;
use std::collections::HashMap;

pub struct PoseRegistry {
    factories: HashMap<String, fn() -> Box<dyn PoseEstimator>>,
}

impl PoseRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register("scripted", || {
            Box::new(crate::scripted_pose::ScriptedEstimator::new())
        });
        registry
    }

    pub fn register(&mut self, name: &str, factory: fn() -> Box<dyn PoseEstimator>) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn PoseEstimator>, PoseError> {
        self.factories
            .get(name)
            .map(|f| f())
            .ok_or_else(|| PoseError::EstimatorNotFound(name.to_string()))
    }

    pub fn list_estimators(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for PoseRegistry {
    fn default() -> Self {
        Self::new()
    }
}
