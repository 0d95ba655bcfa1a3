use ishara_core::config::TrainingConfig;
use ishara_core::{TrainedSignRecord, TrainingError, TrainingPhase, TrainingState};
use ishara_ledger::SignLedger;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub const READY_STATUS: &str = "الرجاء كتابة الكلمة ثم اضغط تسجيل.";
pub const EMPTY_WORD_STATUS: &str = "اكتب الكلمة أولاً قبل البدء بالتسجيل.";
pub const RECORDING_STATUS: &str = "جاري التسجيل... قم بأداء الإشارة أمام الكاميرا.";
pub const CAPTURED_STATUS: &str = "انتهى التسجيل. اضغط \"حفظ الإشارة\" لإضافتها للسجل.";
pub const SAVE_WITHOUT_WORD_STATUS: &str = "لا يمكن الحفظ بدون كلمة.";
pub const CLEARED_STATUS: &str = "تم مسح الحقل. اكتب كلمة جديدة للمتابعة.";

fn saved_status(word: &str) -> String {
    format!("تم حفظ الإشارة بنجاح للكلمة: \"{word}\"")
}

/// `min(100, round(elapsed / duration * 100))`
pub fn progress_percent(elapsed: Duration, duration: Duration) -> u8 {
    if duration.is_zero() {
        return 100;
    }
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    (ratio * 100.0).round().min(100.0) as u8
}

struct SessionState {
    phase: TrainingPhase,
    target_word: String,
    captured_word: Option<String>,
    progress: u8,
    status: String,
    /// Bumped per recording; a sampler only writes while its generation is current.
    generation: u64,
}

impl SessionState {
    fn snapshot(&self) -> TrainingState {
        TrainingState {
            phase: self.phase,
            progress: self.progress,
            status: self.status.clone(),
            can_save: self.phase == TrainingPhase::Captured,
        }
    }
}

struct Shared {
    state: Mutex<SessionState>,
    tx: watch::Sender<TrainingState>,
}

impl Shared {
    /// Run `f` on the state and publish the result.
    fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> Option<R> {
        let mut state = self.state.lock().ok()?;
        let out = f(&mut state);
        self.tx.send_replace(state.snapshot());
        Some(out)
    }
}

/// Simulated capture of a new sign: a countdown, then a commit to the ledger.
pub struct TrainingSession {
    config: TrainingConfig,
    shared: Arc<Shared>,
    timer: Option<JoinHandle<()>>,
}

impl TrainingSession {
    pub fn new(config: TrainingConfig) -> Self {
        let state = SessionState {
            phase: TrainingPhase::Ready,
            target_word: String::new(),
            captured_word: None,
            progress: 0,
            status: READY_STATUS.to_string(),
            generation: 0,
        };
        let (tx, _) = watch::channel(state.snapshot());
        Self {
            config,
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                tx,
            }),
            timer: None,
        }
    }

    pub fn set_target_word(&mut self, text: &str) {
        self.shared.update(|s| s.target_word = text.to_string());
    }

    pub fn target_word(&self) -> String {
        self.shared
            .state
            .lock()
            .map(|s| s.target_word.clone())
            .unwrap_or_default()
    }

    /// Begin recording `word`. Any earlier countdown is cancelled and
    /// progress restarts from zero.
    pub fn start_recording(&mut self, word: &str) -> Result<(), TrainingError> {
        let word = word.trim().to_string();
        if word.is_empty() {
            self.shared
                .update(|s| s.status = EMPTY_WORD_STATUS.to_string());
            return Err(TrainingError::EmptyWord);
        }

        if let Some(old) = self.timer.take() {
            old.abort();
        }
        let generation = self
            .shared
            .update(|s| {
                s.generation += 1;
                s.phase = TrainingPhase::Recording;
                s.captured_word = Some(word.clone());
                s.progress = 0;
                s.status = RECORDING_STATUS.to_string();
                s.generation
            })
            .unwrap_or_default();

        let duration = self.config.duration();
        let sample = self.config.sample_interval();
        let shared = Arc::clone(&self.shared);
        self.timer = Some(tokio::spawn(async move {
            let started = Instant::now();
            let mut interval = tokio::time::interval_at(started + sample, sample);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let elapsed = started.elapsed();
                let done = shared.update(|s| {
                    if s.generation != generation {
                        return true;
                    }
                    s.progress = progress_percent(elapsed, duration);
                    if elapsed >= duration {
                        s.phase = TrainingPhase::Captured;
                        s.status = CAPTURED_STATUS.to_string();
                        return true;
                    }
                    false
                });
                if done.unwrap_or(true) {
                    break;
                }
            }
            tracing::debug!(generation, "training countdown finished");
        }));

        tracing::info!(word = %word, "training recording started");
        Ok(())
    }

    /// Commit the captured word to `ledger` and return to Ready.
    pub fn save(&mut self, ledger: &mut SignLedger) -> Result<TrainedSignRecord, TrainingError> {
        let captured = self
            .shared
            .state
            .lock()
            .ok()
            .filter(|s| s.phase == TrainingPhase::Captured)
            .map(|s| s.captured_word.clone().unwrap_or_default());
        let Some(word) = captured else {
            return Err(TrainingError::NotCaptured);
        };

        let Some(record) = ledger.append(&word) else {
            self.shared
                .update(|s| s.status = SAVE_WITHOUT_WORD_STATUS.to_string());
            return Err(TrainingError::EmptyWord);
        };

        self.shared.update(|s| {
            s.phase = TrainingPhase::Ready;
            s.captured_word = None;
            s.progress = 0;
            s.status = saved_status(&record.word);
        });
        Ok(record)
    }

    /// Reset the word field and status. A running countdown is left alone.
    pub fn clear(&mut self) {
        self.shared.update(|s| {
            s.target_word.clear();
            s.status = CLEARED_STATUS.to_string();
        });
    }

    pub fn snapshot(&self) -> TrainingState {
        self.shared.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TrainingState> {
        self.shared.tx.subscribe()
    }
}

impl Drop for TrainingSession {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
