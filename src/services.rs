use std::sync::{Arc, Mutex};
use std::time::Duration;

use ishara_core::{
    AppConfig, AppState, RecognitionOutcome, RecognitionState, TranslationState, UiCommand,
};
use ishara_engine::recognizer::{STARTING_STATUS, STOPPED_STATUS};
use ishara_engine::{
    PoseCapability, RecognitionHandle, RecognitionSimulator, SharedLedger, StdRandom,
    SyntheticCamera, TrainingSession,
};
use ishara_ledger::{KeyValueStore, MemoryStore, SignLedger, StoreRegistry};
use ishara_lexicon::translator::{VOICE_INSERTED_STATUS, VOICE_RECORDING_STATUS};
use ishara_lexicon::{simulate_voice_input, DebouncedTranslator, LearningTracker, Vocabulary};
use tokio::sync::{mpsc, watch};

const BROADCAST_INTERVAL: Duration = Duration::from_millis(33);

/// Open the configured store backend, falling back to an in-process map so
/// the ledger keeps working for the session.
pub fn open_store(config: &AppConfig) -> Arc<dyn KeyValueStore> {
    let mut table = toml::map::Map::new();
    table.insert(
        "path".to_string(),
        toml::Value::String(config.storage.path.clone()),
    );

    match StoreRegistry::new().open(&config.storage.backend, toml::Value::Table(table)) {
        Ok(store) => Arc::from(store),
        Err(e) => {
            tracing::warn!(
                backend = %config.storage.backend,
                "store unavailable, signs will not persist: {e}"
            );
            Arc::new(MemoryStore::new())
        }
    }
}

/// Everything the UI can drive, owned by one task.
pub struct Services {
    config: AppConfig,
    translator: DebouncedTranslator,
    learning: LearningTracker,
    ledger: SharedLedger,
    recognizer: RecognitionSimulator,
    recognition: Option<RecognitionHandle>,
    recognition_status: String,
    /// Transcript kept on screen after recognition stops.
    idle_transcript: Vec<String>,
    training: TrainingSession,
    voice_status: Option<&'static str>,
    voice_text: String,
    voice_seq: u64,
    voice_tx: mpsc::UnboundedSender<String>,
    voice_rx: Option<mpsc::UnboundedReceiver<String>>,
}

impl Services {
    pub fn new(
        config: AppConfig,
        vocab: Arc<Vocabulary>,
        store: Arc<dyn KeyValueStore>,
        pose: PoseCapability,
    ) -> Self {
        let ledger = Arc::new(Mutex::new(SignLedger::load(
            store,
            &config.storage.key,
            &config.storage.time_format,
        )));
        let recognition_status = pose.status_message().to_string();
        let recognizer = RecognitionSimulator::new(
            config.recognition.clone(),
            Arc::clone(&ledger),
            pose,
            Arc::new(SyntheticCamera::default()),
        );
        let (voice_tx, voice_rx) = mpsc::unbounded_channel();

        Self {
            translator: DebouncedTranslator::spawn(
                Arc::clone(&vocab),
                config.translation.debounce(),
            ),
            learning: LearningTracker::new(vocab, &config.learning),
            training: TrainingSession::new(config.training.clone()),
            ledger,
            recognizer,
            recognition: None,
            recognition_status,
            idle_transcript: Vec::new(),
            voice_status: None,
            voice_text: String::new(),
            voice_seq: 0,
            voice_tx,
            voice_rx: Some(voice_rx),
            config,
        }
    }

    /// Apply commands and publish state until `Quit` or the UI goes away.
    pub async fn run(
        mut self,
        mut cmd_rx: mpsc::UnboundedReceiver<UiCommand>,
        state_tx: watch::Sender<AppState>,
    ) {
        let mut voice_rx = self
            .voice_rx
            .take()
            .unwrap_or_else(|| mpsc::unbounded_channel().1);
        let mut interval = tokio::time::interval(BROADCAST_INTERVAL);
        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(UiCommand::Quit) | None => break,
                        Some(cmd) => self.apply(cmd),
                    }
                }
                Some(text) = voice_rx.recv() => {
                    self.insert_voice_text(text);
                }
                _ = interval.tick() => {
                    if state_tx.send(self.snapshot()).is_err() {
                        break;
                    }
                }
            }
        }
        self.shutdown();
    }

    fn apply(&mut self, cmd: UiCommand) {
        tracing::trace!(?cmd, "ui command");
        match cmd {
            UiCommand::SetInputText(text) => {
                self.voice_status = None;
                self.translator.input(text);
            }
            UiCommand::TranslateNow(text) => {
                self.voice_status = None;
                self.translator.translate_now(text);
            }
            UiCommand::ClearInput => {
                self.voice_status = None;
                self.translator.translate_now("");
            }
            UiCommand::SimulateVoice => self.start_voice_input(),
            UiCommand::SelectCategory(category) => self.learning.select_category(category),
            UiCommand::SelectItem(index) => {
                self.learning.select_item(index);
            }
            UiCommand::CloseItem => self.learning.close_selection(),
            UiCommand::StartDailyChallenge => self.learning.start_daily(),
            UiCommand::ToggleRecognition => self.toggle_recognition(),
            UiCommand::ClearTranscript => match &self.recognition {
                Some(handle) => handle.clear_transcript(),
                None => self.idle_transcript = vec![RecognitionOutcome::Cleared.to_string()],
            },
            UiCommand::SetTargetWord(text) => self.training.set_target_word(&text),
            UiCommand::StartRecording => {
                let word = self.training.target_word();
                if let Err(e) = self.training.start_recording(&word) {
                    tracing::debug!("recording not started: {e}");
                }
            }
            UiCommand::SaveSign => {
                let Ok(mut ledger) = self.ledger.lock() else {
                    tracing::warn!("ledger lock poisoned, sign not saved");
                    return;
                };
                if let Err(e) = self.training.save(&mut ledger) {
                    tracing::debug!("sign not saved: {e}");
                }
            }
            UiCommand::ClearTraining => self.training.clear(),
            UiCommand::Quit => {}
        }
    }

    fn start_voice_input(&mut self) {
        self.voice_status = Some(VOICE_RECORDING_STATUS);
        let delay = self.config.translation.voice_delay();
        let phrase = self.config.translation.voice_phrase.clone();
        let tx = self.voice_tx.clone();
        tokio::spawn(async move {
            let text = simulate_voice_input(delay, &phrase).await;
            let _ = tx.send(text);
        });
    }

    fn insert_voice_text(&mut self, text: String) {
        self.translator.translate_now(text.clone());
        self.voice_text = text;
        self.voice_seq += 1;
        self.voice_status = Some(VOICE_INSERTED_STATUS);
    }

    fn toggle_recognition(&mut self) {
        match self.recognition.take() {
            Some(handle) => {
                self.idle_transcript = handle
                    .stop()
                    .iter()
                    .map(|e| e.outcome.to_string())
                    .collect();
                self.recognition_status = STOPPED_STATUS.to_string();
            }
            None => {
                self.recognition_status = STARTING_STATUS.to_string();
                self.recognition = Some(
                    self.recognizer
                        .start(Box::new(StdRandom::from_entropy())),
                );
            }
        }
    }

    fn snapshot(&self) -> AppState {
        let translation = self.translator.latest();
        let status = match self.voice_status {
            Some(status) => status.to_string(),
            None => translation.status,
        };

        let transcript = match &self.recognition {
            Some(handle) => handle.observer().lines(),
            None => self.idle_transcript.clone(),
        };

        let saved_signs = self
            .ledger
            .lock()
            .map(|l| l.records().to_vec())
            .unwrap_or_default();

        AppState {
            translation: TranslationState {
                tokens: translation.tokens,
                status,
                voice_text: self.voice_text.clone(),
                voice_seq: self.voice_seq,
            },
            learning: self.learning.snapshot(),
            recognition: RecognitionState {
                active: self.recognition.is_some(),
                status: self.recognition_status.clone(),
                transcript,
            },
            training: self.training.snapshot(),
            saved_signs,
        }
    }

    fn shutdown(&mut self) {
        if let Some(handle) = self.recognition.take() {
            handle.stop();
        }
        tracing::info!("services stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ishara_core::TrainingPhase;

    fn services() -> Services {
        let vocab = Arc::new(Vocabulary::builtin().unwrap());
        Services::new(
            AppConfig::default(),
            vocab,
            Arc::new(MemoryStore::new()),
            PoseCapability::unavailable("none"),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_is_debounced_into_state() {
        let mut s = services();
        s.apply(UiCommand::SetInputText("مرحبا".into()));
        s.apply(UiCommand::SetInputText("مرحبا شكرا".into()));
        tokio::time::sleep(Duration::from_millis(700)).await;
        let state = s.snapshot();
        assert_eq!(state.translation.tokens.len(), 2);
        assert_eq!(state.translation.tokens[1].token, "شكرا");
    }

    #[tokio::test(start_paused = true)]
    async fn test_voice_input_reaches_translation() {
        let mut s = services();
        s.apply(UiCommand::SimulateVoice);
        assert_eq!(s.snapshot().translation.status, VOICE_RECORDING_STATUS);

        let text = s.voice_rx.as_mut().unwrap().recv().await.unwrap();
        s.insert_voice_text(text);
        tokio::time::sleep(Duration::from_millis(10)).await;

        let state = s.snapshot();
        assert_eq!(state.translation.voice_seq, 1);
        assert_eq!(state.translation.voice_text, "مرحباً كيف الحال اليوم");
        assert_eq!(state.translation.tokens.len(), 4);
        assert_eq!(state.translation.status, VOICE_INSERTED_STATUS);
    }

    #[tokio::test(start_paused = true)]
    async fn test_train_then_recognize() {
        let mut s = services();
        s.apply(UiCommand::SetTargetWord("سعيد".into()));
        s.apply(UiCommand::StartRecording);
        tokio::time::sleep(Duration::from_millis(5200)).await;
        assert_eq!(s.snapshot().training.phase, TrainingPhase::Captured);

        s.apply(UiCommand::SaveSign);
        assert_eq!(s.snapshot().saved_signs.len(), 1);

        s.apply(UiCommand::ToggleRecognition);
        assert!(s.snapshot().recognition.active);
        assert_eq!(s.snapshot().recognition.status, STARTING_STATUS);
        tokio::time::sleep(Duration::from_millis(3100)).await;
        let transcript = s.snapshot().recognition.transcript;
        assert!(transcript[0].contains("سعيد"), "transcript: {:?}", transcript);

        s.apply(UiCommand::ToggleRecognition);
        let state = s.snapshot();
        assert!(!state.recognition.active);
        assert_eq!(state.recognition.status, STOPPED_STATUS);
        assert_eq!(state.recognition.transcript.len(), 2);

        s.apply(UiCommand::ClearTranscript);
        assert_eq!(
            s.snapshot().recognition.transcript,
            vec![RecognitionOutcome::Cleared.to_string()]
        );
    }

    #[tokio::test]
    async fn test_learning_commands() {
        let mut s = services();
        s.apply(UiCommand::SelectCategory(ishara_core::Category::Numbers));
        s.apply(UiCommand::SelectItem(0));
        let learning = s.snapshot().learning;
        assert_eq!(learning.category, ishara_core::Category::Numbers);
        assert_eq!(learning.progress.current, 22);
        assert_eq!(learning.daily.done, 1);
        assert_eq!(
            learning.selected.as_ref().map(|e| e.token.as_str()),
            Some("١")
        );

        s.apply(UiCommand::CloseItem);
        assert!(s.snapshot().learning.selected.is_none());
    }

    #[tokio::test]
    async fn test_recognition_status_starts_from_model_state() {
        let s = services();
        assert_eq!(
            s.snapshot().recognition.status,
            PoseCapability::unavailable("none").status_message()
        );
    }
}
