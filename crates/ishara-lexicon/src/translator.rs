use crate::vocabulary::Vocabulary;
use ishara_core::TranslatedToken;
use std::time::Duration;

pub const REFRESHED_STATUS: &str = "تم تحديث الترجمة.";
pub const VOICE_RECORDING_STATUS: &str = "جارٍ التسجيل...";
pub const VOICE_INSERTED_STATUS: &str = "تم إدخال النص الصوتي التجريبي.";

/// Result of translating one input plus the status line that goes with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    pub tokens: Vec<TranslatedToken>,
    pub status: String,
}

impl Translation {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Split `text` on runs of whitespace.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Resolve every token of `text` against `vocab`, keeping order and
/// duplicates. Unknown tokens come back with no media reference.
pub fn translate(vocab: &Vocabulary, text: &str) -> Translation {
    let tokens: Vec<TranslatedToken> = tokenize(text)
        .map(|token| TranslatedToken {
            token: token.to_string(),
            media_ref: vocab.lookup(token).map(str::to_string),
        })
        .collect();

    if tokens.is_empty() {
        return Translation::default();
    }

    tracing::debug!(
        tokens = tokens.len(),
        resolved = tokens.iter().filter(|t| t.has_sign()).count(),
        "translation refreshed"
    );
    Translation {
        tokens,
        status: REFRESHED_STATUS.to_string(),
    }
}

/// Stand-in for speech input: waits `delay`, then yields `phrase`.
pub async fn simulate_voice_input(delay: Duration, phrase: &str) -> String {
    tokio::time::sleep(delay).await;
    tracing::info!("mock voice input produced {} chars", phrase.chars().count());
    phrase.to_string()
}
