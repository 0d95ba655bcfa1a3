use crate::pose_trait::PoseEstimator;
use crate::registry::PoseRegistry;
use ishara_core::config::PoseConfig;
use std::sync::Arc;

pub const MODEL_READY_STATUS: &str = "النموذج جاهز للكشف";
pub const MODEL_FALLBACK_STATUS: &str = "تعذر تحميل النموذج، سيتم استخدام محاكاة مبسطة";

/// The pose collaborator as seen by callers: either usable or not, never null.
#[derive(Clone)]
pub enum PoseCapability {
    Available(Arc<dyn PoseEstimator>),
    Unavailable { reason: String },
}

impl PoseCapability {
    /// Build the configured estimator. Any failure degrades to
    /// [`PoseCapability::Unavailable`].
    pub async fn load(config: Option<&PoseConfig>, registry: &PoseRegistry) -> Self {
        let Some(config) = config else {
            return Self::unavailable("no pose estimator configured");
        };

        let mut estimator = match registry.create(&config.estimator) {
            Ok(estimator) => estimator,
            Err(e) => {
                tracing::warn!("pose estimator unavailable: {e}");
                return Self::unavailable(e.to_string());
            }
        };
        if let Err(e) = estimator.initialize(config.extra.clone()).await {
            tracing::warn!(estimator = %config.estimator, "pose estimator failed to load: {e}");
            return Self::unavailable(e.to_string());
        }

        tracing::info!(estimator = %estimator.name(), "pose estimator loaded");
        Self::Available(Arc::from(estimator))
    }

    pub fn available(estimator: Arc<dyn PoseEstimator>) -> Self {
        Self::Available(estimator)
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn status_message(&self) -> &'static str {
        match self {
            Self::Available(_) => MODEL_READY_STATUS,
            Self::Unavailable { .. } => MODEL_FALLBACK_STATUS,
        }
    }
}

impl std::fmt::Debug for PoseCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(estimator) => write!(f, "Available({})", estimator.name()),
            Self::Unavailable { reason } => write!(f, "Unavailable({reason})"),
        }
    }
}
