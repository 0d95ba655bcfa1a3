use ishara_core::{Category, VocabularyEntry, VocabularyError};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

const BUILTIN_TABLE: &str = include_str!("../data/vocabulary.toml");

#[derive(Debug, Deserialize)]
struct RawEntry {
    token: String,
    #[serde(default)]
    media_ref: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    #[serde(default)]
    letters: Vec<RawEntry>,
    #[serde(default)]
    numbers: Vec<RawEntry>,
    #[serde(default)]
    words: Vec<RawEntry>,
    #[serde(default)]
    apps: Vec<RawEntry>,
}

/// Immutable token → clip table. Lookups are exact: no case folding,
/// diacritic stripping or stemming.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// The table compiled into the binary.
    pub fn builtin() -> Result<Self, VocabularyError> {
        Self::from_toml_str(BUILTIN_TABLE)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, VocabularyError> {
        let raw: RawTable = toml::from_str(s)?;
        let sections = [
            (Category::Letters, raw.letters),
            (Category::Numbers, raw.numbers),
            (Category::Words, raw.words),
            (Category::Apps, raw.apps),
        ];

        let mut vocab = Self {
            entries: Vec::new(),
            index: HashMap::new(),
        };
        for (category, section) in sections {
            for raw_entry in section {
                if vocab.index.contains_key(&raw_entry.token) {
                    return Err(VocabularyError::DuplicateToken(raw_entry.token));
                }
                vocab.push(VocabularyEntry {
                    token: raw_entry.token,
                    media_ref: raw_entry.media_ref,
                    category,
                });
            }
        }

        tracing::debug!("loaded vocabulary with {} entries", vocab.len());
        Ok(vocab)
    }

    /// Merge user-supplied pairs. Known tokens get their clip replaced,
    /// unknown ones are added to [`Category::Words`].
    pub fn with_extra(mut self, extra: &BTreeMap<String, String>) -> Self {
        for (token, media_ref) in extra {
            match self.index.get(token) {
                Some(&i) => self.entries[i].media_ref = Some(media_ref.clone()),
                None => self.push(VocabularyEntry {
                    token: token.clone(),
                    media_ref: Some(media_ref.clone()),
                    category: Category::Words,
                }),
            }
        }
        self
    }

    fn push(&mut self, entry: VocabularyEntry) {
        self.index.insert(entry.token.clone(), self.entries.len());
        self.entries.push(entry);
    }

    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.get(token).and_then(|e| e.media_ref.as_deref())
    }

    pub fn get(&self, token: &str) -> Option<&VocabularyEntry> {
        self.index.get(token).map(|&i| &self.entries[i])
    }

    /// Entries of one category, in table order.
    pub fn entries(&self, category: Category) -> impl Iterator<Item = &VocabularyEntry> + '_ {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_parses() {
        let vocab = Vocabulary::builtin().unwrap();
        assert!(!vocab.is_empty());
        assert_eq!(vocab.entries(Category::Letters).count(), 28);
        assert_eq!(vocab.entries(Category::Numbers).count(), 10);
        assert!(vocab.entries(Category::Words).count() > 0);
        assert_eq!(vocab.entries(Category::Apps).count(), 4);
    }

    #[test]
    fn test_lookup_exact_match() {
        let vocab = Vocabulary::builtin().unwrap();
        assert_eq!(
            vocab.lookup("مرحباً"),
            Some("https://mock-video-url/words/hello.mp4")
        );
        assert_eq!(
            vocab.lookup("واتساب"),
            Some("https://mock-video-url/apps/whatsapp.mp4")
        );
    }

    #[test]
    fn test_lookup_is_not_normalized() {
        let vocab = Vocabulary::builtin().unwrap();
        // tanween and surrounding whitespace are significant
        assert!(vocab.lookup("شكرا").is_none());
        assert!(vocab.lookup(" نعم").is_none());
    }

    #[test]
    fn test_known_token_without_clip() {
        let vocab = Vocabulary::builtin().unwrap();
        let entry = vocab.get("الحال").unwrap();
        assert_eq!(entry.category, Category::Words);
        assert!(entry.media_ref.is_none());
        assert!(vocab.lookup("الحال").is_none());
    }

    #[test]
    fn test_entries_keep_table_order() {
        let vocab = Vocabulary::builtin().unwrap();
        let numbers: Vec<&str> = vocab
            .entries(Category::Numbers)
            .map(|e| e.token.as_str())
            .collect();
        assert_eq!(numbers.first(), Some(&"١"));
        assert_eq!(numbers.last(), Some(&"١٠"));
    }

    #[test]
    fn test_duplicate_token_rejected() {
        let table = r#"
[[letters]]
token = "ب"

[[words]]
token = "ب"
"#;
        match Vocabulary::from_toml_str(table) {
            Err(VocabularyError::DuplicateToken(token)) => assert_eq!(token, "ب"),
            other => panic!("expected DuplicateToken, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn test_malformed_table_rejected() {
        let result = Vocabulary::from_toml_str("[[letters]]\nmedia_ref = 3");
        assert!(matches!(result, Err(VocabularyError::Parse(_))));
    }

    #[test]
    fn test_with_extra_adds_and_overrides() {
        let mut extra = BTreeMap::new();
        extra.insert(
            "قهوة".to_string(),
            "https://mock-video-url/words/coffee.mp4".to_string(),
        );
        extra.insert(
            "الحال".to_string(),
            "https://mock-video-url/words/state.mp4".to_string(),
        );
        let before = Vocabulary::builtin().unwrap().len();
        let vocab = Vocabulary::builtin().unwrap().with_extra(&extra);

        assert_eq!(vocab.len(), before + 1);
        assert_eq!(
            vocab.lookup("قهوة"),
            Some("https://mock-video-url/words/coffee.mp4")
        );
        assert_eq!(vocab.get("قهوة").unwrap().category, Category::Words);
        assert_eq!(
            vocab.lookup("الحال"),
            Some("https://mock-video-url/words/state.mp4")
        );
    }
}
