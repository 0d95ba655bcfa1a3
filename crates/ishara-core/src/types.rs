use serde::{Deserialize, Serialize};
use std::fmt;

/// Vocabulary section a sign belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Letters,
    Numbers,
    Words,
    Apps,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Letters,
        Category::Numbers,
        Category::Words,
        Category::Apps,
    ];

    /// Section heading shown in the learning browser.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Letters => "الأحرف العربية",
            Category::Numbers => "الأرقام",
            Category::Words => "الكلمات الشائعة",
            Category::Apps => "التطبيقات المعروفة",
        }
    }

    /// Short label for a single item of this category.
    pub fn item_label(&self) -> &'static str {
        match self {
            Category::Letters => "حرف",
            Category::Numbers => "رقم",
            Category::Words => "كلمة",
            Category::Apps => "تطبيق",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub token: String,
    pub media_ref: Option<String>,
    pub category: Category,
}

/// One token of translated input and the clip it resolved to, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslatedToken {
    pub token: String,
    pub media_ref: Option<String>,
}

impl TranslatedToken {
    pub fn has_sign(&self) -> bool {
        self.media_ref.is_some()
    }
}

/// A word the user recorded in the training flow.
///
/// Serialized as `{"word": .., "time": ..}` to stay compatible with the
/// existing store layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainedSignRecord {
    pub word: String,
    #[serde(rename = "time")]
    pub recorded_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionOutcome {
    Preparing,
    Cleared,
    TrainedWord(String),
    LikelySign,
    NoClearSign,
    NoTrainedWords,
    DetectionError,
}

impl fmt::Display for RecognitionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognitionOutcome::Preparing => write!(f, "... يتم التحضير لبدء الكشف ..."),
            RecognitionOutcome::Cleared => write!(f, "تم مسح النص."),
            RecognitionOutcome::TrainedWord(word) => write!(f, "تم الكشف (كلمة مدربة): {word}"),
            RecognitionOutcome::LikelySign => {
                write!(f, "تم الكشف: إشارة محتملة بناءً على الهيكل العظمي")
            }
            RecognitionOutcome::NoClearSign => write!(f, "لم يتم التعرف على إشارة واضحة."),
            RecognitionOutcome::NoTrainedWords => write!(
                f,
                "لا توجد كلمات مدربة بعد. انتقل إلى واجهة التدريب لإضافة إشارات جديدة."
            ),
            RecognitionOutcome::DetectionError => write!(f, "حدثت مشكلة أثناء الكشف."),
        }
    }
}

/// A transcript line. `tick` is 0 for placeholders that no tick produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionEvent {
    pub tick: u64,
    pub outcome: RecognitionOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrainingPhase {
    #[default]
    Ready,
    Recording,
    Captured,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub tip: String,
    pub unlocked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DailyChallenge {
    pub target: u32,
    pub done: u32,
    pub status: String,
}

impl DailyChallenge {
    pub fn is_complete(&self) -> bool {
        self.done >= self.target
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressMeter {
    pub current: u32,
    pub total: u32,
}

impl ProgressMeter {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.current as f64 / self.total as f64) * 100.0).round() as u32
    }
}
