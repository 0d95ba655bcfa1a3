use crate::vocabulary::Vocabulary;
use ishara_core::config::LearningConfig;
use ishara_core::{Badge, Category, DailyChallenge, LearningState, ProgressMeter, VocabularyEntry};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const ENCOURAGEMENT: &str = "عمل رائع! أنت تتقن الإشارات 👏";
pub const TOAST_DURATION: Duration = Duration::from_millis(1800);

const DAILY_READY: &str = "جاهز للتحدي";
const DAILY_STARTED: &str = "التحدي بدأ، لننطلق!";
const DAILY_ONGOING: &str = "استمر، خطوة رائعة.";
const DAILY_COMPLETE: &str = "أحسنت! أنهيت تحدي اليوم.";

const NUMBERS_BADGE: &str = "numbers";

fn default_badges() -> Vec<Badge> {
    vec![
        Badge {
            id: "alpha".to_string(),
            label: "هاوي الأبجدية".to_string(),
            icon: "🔠".to_string(),
            tip: "تفاعل مع 10 أحرف.".to_string(),
            unlocked: true,
        },
        Badge {
            id: NUMBERS_BADGE.to_string(),
            label: "بطل الأرقام".to_string(),
            icon: "🔢".to_string(),
            tip: "أكمل جميع الأرقام.".to_string(),
            unlocked: false,
        },
    ]
}

/// Card browser with progress meter, badges and a daily challenge.
pub struct LearningTracker {
    vocab: Arc<Vocabulary>,
    category: Category,
    progress: ProgressMeter,
    step: u32,
    badges: Vec<Badge>,
    daily: DailyChallenge,
    toast: Option<(String, Instant)>,
    selected: Option<VocabularyEntry>,
}

impl LearningTracker {
    pub fn new(vocab: Arc<Vocabulary>, config: &LearningConfig) -> Self {
        Self {
            vocab,
            category: Category::Letters,
            progress: ProgressMeter {
                current: config.progress_start.min(config.progress_total),
                total: config.progress_total,
            },
            step: config.progress_step,
            badges: default_badges(),
            daily: DailyChallenge {
                target: config.daily_target,
                done: 0,
                status: DAILY_READY.to_string(),
            },
            toast: None,
            selected: None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn select_category(&mut self, category: Category) {
        self.category = category;
    }

    /// Items of the active category.
    pub fn items(&self) -> Vec<VocabularyEntry> {
        self.vocab.entries(self.category).cloned().collect()
    }

    /// Open the item at `index` of the active category and keep it as the
    /// selected clip. Advances progress and the daily challenge. Returns
    /// `None` when the index is out of range.
    pub fn select_item(&mut self, index: usize) -> Option<VocabularyEntry> {
        let entry = self.vocab.entries(self.category).nth(index)?.clone();

        self.progress.current = self
            .progress
            .current
            .saturating_add(self.step)
            .min(self.progress.total);

        if self.category == Category::Numbers && self.progress.current >= self.progress.total {
            for badge in self.badges.iter_mut().filter(|b| b.id == NUMBERS_BADGE) {
                if !badge.unlocked {
                    tracing::info!("badge unlocked: {}", badge.label);
                }
                badge.unlocked = true;
            }
        }

        self.daily.done = self.daily.done.saturating_add(1).min(self.daily.target);
        self.daily.status = if self.daily.is_complete() {
            DAILY_COMPLETE
        } else {
            DAILY_ONGOING
        }
        .to_string();

        self.toast = Some((ENCOURAGEMENT.to_string(), Instant::now()));
        self.selected = Some(entry.clone());
        Some(entry)
    }

    pub fn selected(&self) -> Option<&VocabularyEntry> {
        self.selected.as_ref()
    }

    pub fn close_selection(&mut self) {
        self.selected = None;
    }

    pub fn start_daily(&mut self) {
        self.daily = DailyChallenge {
            target: self.daily.target,
            done: 0,
            status: DAILY_STARTED.to_string(),
        };
    }

    pub fn progress(&self) -> ProgressMeter {
        self.progress
    }

    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    pub fn daily(&self) -> &DailyChallenge {
        &self.daily
    }

    /// The encouragement message, while it is still fresh.
    pub fn toast(&self) -> Option<&str> {
        self.toast
            .as_ref()
            .filter(|(_, shown_at)| shown_at.elapsed() < TOAST_DURATION)
            .map(|(msg, _)| msg.as_str())
    }

    pub fn snapshot(&self) -> LearningState {
        LearningState {
            category: self.category,
            items: self.items(),
            progress: self.progress,
            badges: self.badges.clone(),
            daily: self.daily.clone(),
            toast: self.toast().map(str::to_string),
            selected: self.selected.clone(),
        }
    }
}
