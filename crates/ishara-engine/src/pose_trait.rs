use crate::frame::VideoFrame;
use async_trait::async_trait;
use ishara_core::PoseError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub score: f32,
}

/// One detected body with its keypoints, in the estimator's order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pose {
    pub keypoints: Vec<Keypoint>,
}

impl Pose {
    /// Confidence of the leading keypoint, 0 when there is none.
    pub fn lead_score(&self) -> f32 {
        self.keypoints.first().map(|k| k.score).unwrap_or(0.0)
    }
}

/// External pose-estimation model.
#[async_trait]
pub trait PoseEstimator: Send + Sync {
    fn name(&self) -> &str;
    async fn initialize(&mut self, config: toml::Value) -> Result<(), PoseError>;
    async fn estimate_poses(&self, frame: &VideoFrame) -> Result<Vec<Pose>, PoseError>;
}
