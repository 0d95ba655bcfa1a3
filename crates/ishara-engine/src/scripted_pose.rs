use crate::frame::VideoFrame;
use crate::pose_trait::{Keypoint, Pose, PoseEstimator};
use async_trait::async_trait;
use ishara_core::PoseError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Replays a fixed list of lead-keypoint scores, one per query, cycling.
///
/// Config keys: `scores` (required, non-empty), `fail_every` (every n-th
/// query fails, 0 = never), `latency_ms` (simulated inference time).
pub struct ScriptedEstimator {
    scores: Vec<f32>,
    fail_every: u64,
    latency: Duration,
    calls: AtomicU64,
}

impl ScriptedEstimator {
    pub fn new() -> Self {
        Self {
            scores: Vec::new(),
            fail_every: 0,
            latency: Duration::ZERO,
            calls: AtomicU64::new(0),
        }
    }

    pub fn with_scores(scores: Vec<f32>) -> Self {
        Self {
            scores,
            ..Self::new()
        }
    }

    pub fn fail_every(mut self, n: u64) -> Self {
        self.fail_every = n;
        self
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Default for ScriptedEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PoseEstimator for ScriptedEstimator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn initialize(&mut self, config: toml::Value) -> Result<(), PoseError> {
        let scores = config
            .get("scores")
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                PoseError::InitializationFailed("missing 'scores' in scripted config".to_string())
            })?;
        self.scores = scores
            .iter()
            .map(|v| {
                v.as_float()
                    .or_else(|| v.as_integer().map(|i| i as f64))
                    .map(|f| f as f32)
                    .ok_or_else(|| {
                        PoseError::InitializationFailed(format!("score {v} is not a number"))
                    })
            })
            .collect::<Result<_, _>>()?;
        if self.scores.is_empty() {
            return Err(PoseError::InitializationFailed(
                "'scores' must not be empty".to_string(),
            ));
        }

        if let Some(n) = config.get("fail_every").and_then(|v| v.as_integer()) {
            self.fail_every = n.max(0) as u64;
        }
        if let Some(ms) = config.get("latency_ms").and_then(|v| v.as_integer()) {
            self.latency = Duration::from_millis(ms.max(0) as u64);
        }

        tracing::info!(
            scores = self.scores.len(),
            fail_every = self.fail_every,
            "ScriptedEstimator initialized"
        );
        Ok(())
    }

    async fn estimate_poses(&self, frame: &VideoFrame) -> Result<Vec<Pose>, PoseError> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.fail_every > 0 && n % self.fail_every == 0 {
            return Err(PoseError::EstimationFailed(format!(
                "scripted failure on query #{n}"
            )));
        }
        if self.scores.is_empty() {
            return Ok(Vec::new());
        }

        let score = self.scores[((n - 1) % self.scores.len() as u64) as usize];
        tracing::trace!(frame = frame.sequence, score, "scripted pose");
        Ok(vec![Pose {
            keypoints: vec![Keypoint {
                x: frame.width as f32 / 2.0,
                y: frame.height as f32 / 3.0,
                score,
            }],
        }])
    }
}
