pub mod config;
pub mod error;
pub mod tui_types;
pub mod types;

pub use config::{AppConfig, ConfigOrigin};
pub use error::{ConfigError, PoseError, StoreError, TrainingError, VocabularyError};
pub use tui_types::{
    AppState, LearningState, RecognitionState, TrainingState, TranslationState, UiCommand,
};
pub use types::{
    Badge, Category, DailyChallenge, ProgressMeter, RecognitionEvent, RecognitionOutcome,
    TrainedSignRecord, TrainingPhase, TranslatedToken, VocabularyEntry,
};
