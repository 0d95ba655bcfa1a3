use crate::error::ConfigError;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub translation: TranslationConfig,

    #[serde(default)]
    pub recognition: RecognitionConfig,

    #[serde(default)]
    pub pose: Option<PoseConfig>,

    #[serde(default)]
    pub training: TrainingConfig,

    #[serde(default)]
    pub learning: LearningConfig,

    #[serde(default)]
    pub vocabulary: VocabularyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: String,

    #[serde(default = "default_store_path")]
    pub path: String,

    #[serde(default = "default_store_key")]
    pub key: String,

    #[serde(default = "default_time_format")]
    pub time_format: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_store_path(),
            key: default_store_key(),
            time_format: default_time_format(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TranslationConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_voice_delay_ms")]
    pub voice_delay_ms: u64,

    #[serde(default = "default_voice_phrase")]
    pub voice_phrase: String,
}

impl TranslationConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn voice_delay(&self) -> Duration {
        Duration::from_millis(self.voice_delay_ms)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            voice_delay_ms: default_voice_delay_ms(),
            voice_phrase: default_voice_phrase(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecognitionConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,

    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl RecognitionConfig {
    /// Never zero; a zero period cannot drive a timer.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            confidence_threshold: default_confidence_threshold(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PoseConfig {
    pub estimator: String,

    #[serde(flatten)]
    pub extra: toml::Value,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TrainingConfig {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,

    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,
}

impl TrainingConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms.max(1))
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            sample_interval_ms: default_sample_interval_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LearningConfig {
    #[serde(default = "default_progress_start")]
    pub progress_start: u32,

    #[serde(default = "default_progress_total")]
    pub progress_total: u32,

    #[serde(default = "default_progress_step")]
    pub progress_step: u32,

    #[serde(default = "default_daily_target")]
    pub daily_target: u32,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            progress_start: default_progress_start(),
            progress_total: default_progress_total(),
            progress_step: default_progress_step(),
            daily_target: default_daily_target(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct VocabularyConfig {
    /// Additional `token = media_ref` pairs merged into the common words.
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_backend() -> String {
    "file".to_string()
}

fn default_store_path() -> String {
    "ishara-store.json".to_string()
}

fn default_store_key() -> String {
    "savedSignsList".to_string()
}

fn default_time_format() -> String {
    "%H:%M".to_string()
}

fn default_debounce_ms() -> u64 {
    600
}

fn default_voice_delay_ms() -> u64 {
    800
}

fn default_voice_phrase() -> String {
    "مرحباً كيف الحال اليوم".to_string()
}

fn default_tick_interval_ms() -> u64 {
    3000
}

fn default_confidence_threshold() -> f32 {
    0.4
}

fn default_query_timeout_ms() -> u64 {
    2000
}

fn default_duration_ms() -> u64 {
    5000
}

fn default_sample_interval_ms() -> u64 {
    200
}

fn default_progress_start() -> u32 {
    20
}

fn default_progress_total() -> u32 {
    100
}

fn default_progress_step() -> u32 {
    2
}

fn default_daily_target() -> u32 {
    5
}

/// Interpolate `${VAR}` patterns with environment variable values.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid");
    let mut result = input.to_string();

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(val) => {
                result = result.replace(&cap[0], &val);
            }
            Err(_) => return Err(ConfigError::EnvVarNotFound(var_name.to_string())),
        }
    }

    Ok(result)
}

/// Where a loaded [`AppConfig`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    File,
    Defaults,
}

impl AppConfig {
    /// Load configuration from a TOML file, with environment variable interpolation.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Like [`load_from_file`](Self::load_from_file), but a missing file yields
    /// defaults. The origin is returned so the caller can report it once
    /// logging is up.
    pub fn load_or_default(path: &Path) -> Result<(Self, ConfigOrigin), ConfigError> {
        if !path.exists() {
            return Ok((Self::default(), ConfigOrigin::Defaults));
        }
        Ok((Self::load_from_file(path)?, ConfigOrigin::File))
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let interpolated = interpolate_env_vars(s)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }
}
