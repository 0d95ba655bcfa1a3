use crate::types::{
    Badge, Category, DailyChallenge, ProgressMeter, TrainedSignRecord, TrainingPhase,
    TranslatedToken, VocabularyEntry,
};

/// Translate tab: latest published translation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationState {
    pub tokens: Vec<TranslatedToken>,
    pub status: String,
    /// Text produced by simulated voice input; `voice_seq` bumps on each insert.
    pub voice_text: String,
    pub voice_seq: u64,
}

/// Learn tab: active category, its items and the gamification widgets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LearningState {
    pub category: Category,
    pub items: Vec<VocabularyEntry>,
    pub progress: ProgressMeter,
    pub badges: Vec<Badge>,
    pub daily: DailyChallenge,
    pub toast: Option<String>,
    /// The item whose clip is open, if any.
    pub selected: Option<VocabularyEntry>,
}

/// Recognize tab: whether the loop runs, and its transcript (newest first).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecognitionState {
    pub active: bool,
    pub status: String,
    pub transcript: Vec<String>,
}

/// Train tab: session phase, progress percentage and status line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingState {
    pub phase: TrainingPhase,
    pub progress: u8,
    pub status: String,
    pub can_save: bool,
}

/// Aggregate application state broadcast to the TUI via watch channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub translation: TranslationState,
    pub learning: LearningState,
    pub recognition: RecognitionState,
    pub training: TrainingState,
    pub saved_signs: Vec<TrainedSignRecord>,
}

/// Commands sent from TUI → main via mpsc channel.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    SetInputText(String),
    TranslateNow(String),
    SimulateVoice,
    ClearInput,
    SelectCategory(Category),
    SelectItem(usize),
    StartDailyChallenge,
    ToggleRecognition,
    CloseItem,
    ClearTranscript,
    SetTargetWord(String),
    StartRecording,
    SaveSign,
    ClearTraining,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_default() {
        let state = AppState::default();
        assert!(state.translation.tokens.is_empty());
        assert!(!state.recognition.active);
        assert!(state.recognition.transcript.is_empty());
        assert_eq!(state.training.phase, TrainingPhase::Ready);
        assert_eq!(state.training.progress, 0);
        assert!(!state.training.can_save);
        assert_eq!(state.learning.category, Category::Letters);
        assert!(state.saved_signs.is_empty());
    }

    #[test]
    fn test_ui_command_clone_eq() {
        let cmd = UiCommand::SetTargetWord("جائع".to_string());
        let cloned = cmd.clone();
        assert_eq!(cmd, cloned);
    }

    #[test]
    fn test_app_state_is_clone() {
        let state = AppState {
            translation: TranslationState {
                tokens: vec![TranslatedToken {
                    token: "مرحباً".to_string(),
                    media_ref: Some("https://mock-video-url/words/hello.mp4".to_string()),
                }],
                status: "تم تحديث الترجمة.".to_string(),
                ..Default::default()
            },
            saved_signs: vec![TrainedSignRecord {
                word: "سعيد".to_string(),
                recorded_at: "10:30".to_string(),
            }],
            ..Default::default()
        };
        let cloned = state.clone();
        assert_eq!(state, cloned);
    }
}
