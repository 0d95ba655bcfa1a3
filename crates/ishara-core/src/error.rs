use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store initialization failed: {0}")]
    InitializationFailed(String),

    #[error("failed to read from store: {0}")]
    ReadFailed(String),

    #[error("failed to write to store: {0}")]
    WriteFailed(String),

    #[error("failed to encode records: {0}")]
    Encode(String),

    #[error("store backend not found: {0}")]
    BackendNotFound(String),
}

#[derive(Debug, Error)]
pub enum PoseError {
    #[error("pose estimator initialization failed: {0}")]
    InitializationFailed(String),

    #[error("pose estimation failed: {0}")]
    EstimationFailed(String),

    #[error("pose estimator not found: {0}")]
    EstimatorNotFound(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrainingError {
    #[error("no target word given")]
    EmptyWord,

    #[error("no captured recording to save")]
    NotCaptured,
}

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to parse vocabulary table: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate token in vocabulary table: {0}")]
    DuplicateToken(String),
}
