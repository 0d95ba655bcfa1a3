use crate::capability::PoseCapability;
use crate::frame::FrameSource;
use crate::random::RandomSource;
use ishara_core::config::RecognitionConfig;
use ishara_core::{RecognitionEvent, RecognitionOutcome};
use ishara_ledger::SignLedger;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::time::{Instant, MissedTickBehavior};

pub type SharedLedger = Arc<Mutex<SignLedger>>;

pub const STARTING_STATUS: &str = "تشغيل الكاميرا والتهيئة";
pub const STOPPED_STATUS: &str = "أُوقِف الكشف";

struct TranscriptState {
    active: bool,
    completed_ticks: u64,
    events: VecDeque<RecognitionEvent>,
}

impl TranscriptState {
    fn reset_to(&mut self, outcome: RecognitionOutcome) {
        self.events.clear();
        self.events.push_front(RecognitionEvent { tick: 0, outcome });
    }
}

/// Periodic "detection" over the camera feed.
///
/// Idle until [`start`](Self::start); the returned [`RecognitionHandle`] is
/// the only owner of the tick task.
pub struct RecognitionSimulator {
    config: RecognitionConfig,
    ledger: SharedLedger,
    pose: PoseCapability,
    frames: Arc<dyn FrameSource>,
}

impl RecognitionSimulator {
    pub fn new(
        config: RecognitionConfig,
        ledger: SharedLedger,
        pose: PoseCapability,
        frames: Arc<dyn FrameSource>,
    ) -> Self {
        Self {
            config,
            ledger,
            pose,
            frames,
        }
    }

    pub fn start(&self, mut rng: Box<dyn RandomSource>) -> RecognitionHandle {
        let state = Arc::new(Mutex::new(TranscriptState {
            active: true,
            completed_ticks: 0,
            events: VecDeque::new(),
        }));
        if let Ok(mut s) = state.lock() {
            s.reset_to(RecognitionOutcome::Preparing);
        }

        let period = self.config.tick_interval();
        let detector = Detector {
            threshold: self.config.confidence_threshold,
            query_timeout: self.config.query_timeout(),
            ledger: Arc::clone(&self.ledger),
            pose: self.pose.clone(),
            frames: Arc::clone(&self.frames),
        };
        let shared = Arc::clone(&state);

        let task_handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let Some(outcome) = detector.detect(rng.as_mut()).await else {
                    tracing::trace!("camera not ready, tick skipped");
                    continue;
                };
                let Ok(mut s) = shared.lock() else {
                    break;
                };
                if !s.active {
                    break;
                }
                s.completed_ticks += 1;
                let tick = s.completed_ticks;
                tracing::debug!(tick, "recognition: {}", outcome);
                s.events.push_front(RecognitionEvent { tick, outcome });
            }
        });

        tracing::info!(
            period_ms = period.as_millis() as u64,
            pose = ?self.pose,
            "recognition started"
        );
        RecognitionHandle {
            state,
            task_handle: Some(task_handle),
        }
    }
}

struct Detector {
    threshold: f32,
    query_timeout: std::time::Duration,
    ledger: SharedLedger,
    pose: PoseCapability,
    frames: Arc<dyn FrameSource>,
}

impl Detector {
    /// One tick's outcome, `None` when there is no frame to look at.
    async fn detect(&self, rng: &mut dyn RandomSource) -> Option<RecognitionOutcome> {
        let frame = self.frames.current_frame()?;

        let words = self
            .ledger
            .lock()
            .map(|ledger| ledger.words())
            .unwrap_or_default();
        if !words.is_empty() {
            // keep the tick alive even if a random source misbehaves
            let index = rng.pick(words.len()) % words.len();
            return Some(RecognitionOutcome::TrainedWord(words[index].clone()));
        }

        let estimator = match &self.pose {
            PoseCapability::Available(estimator) => estimator,
            PoseCapability::Unavailable { .. } => return Some(RecognitionOutcome::NoTrainedWords),
        };

        let outcome =
            match tokio::time::timeout(self.query_timeout, estimator.estimate_poses(&frame)).await {
                Ok(Ok(poses)) => {
                    let score = poses.first().map(|p| p.lead_score()).unwrap_or(0.0);
                    if score > self.threshold {
                        RecognitionOutcome::LikelySign
                    } else {
                        RecognitionOutcome::NoClearSign
                    }
                }
                Ok(Err(e)) => {
                    tracing::warn!(estimator = %estimator.name(), "detection error: {e}");
                    RecognitionOutcome::DetectionError
                }
                Err(_) => {
                    tracing::warn!(
                        estimator = %estimator.name(),
                        "pose query exceeded {:?}",
                        self.query_timeout
                    );
                    RecognitionOutcome::DetectionError
                }
            };
        Some(outcome)
    }
}

/// Read-only view of a transcript that outlives the handle.
#[derive(Clone)]
pub struct TranscriptObserver {
    state: Arc<Mutex<TranscriptState>>,
}

impl TranscriptObserver {
    /// Events, newest first.
    pub fn snapshot(&self) -> Vec<RecognitionEvent> {
        self.state
            .lock()
            .map(|s| s.events.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|e| e.outcome.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().map(|s| s.events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_active(&self) -> bool {
        self.state.lock().map(|s| s.active).unwrap_or(false)
    }

    pub fn ticks(&self) -> u64 {
        self.state.lock().map(|s| s.completed_ticks).unwrap_or(0)
    }
}

/// An active recognition run. Stopping (or dropping) it cancels the tick
/// task; once `stop` returns the transcript no longer changes.
pub struct RecognitionHandle {
    state: Arc<Mutex<TranscriptState>>,
    task_handle: Option<tokio::task::JoinHandle<()>>,
}

impl RecognitionHandle {
    pub fn observer(&self) -> TranscriptObserver {
        TranscriptObserver {
            state: Arc::clone(&self.state),
        }
    }

    pub fn transcript(&self) -> Vec<RecognitionEvent> {
        self.observer().snapshot()
    }

    pub fn ticks(&self) -> u64 {
        self.observer().ticks()
    }

    pub fn clear_transcript(&self) {
        if let Ok(mut s) = self.state.lock() {
            s.reset_to(RecognitionOutcome::Cleared);
        }
    }

    /// Stop ticking and return the final transcript.
    pub fn stop(mut self) -> Vec<RecognitionEvent> {
        self.halt();
        self.transcript()
    }

    fn halt(&mut self) {
        if let Ok(mut s) = self.state.lock() {
            s.active = false;
        }
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
            tracing::info!("recognition stopped");
        }
    }
}

impl Drop for RecognitionHandle {
    fn drop(&mut self) {
        self.halt();
    }
}
