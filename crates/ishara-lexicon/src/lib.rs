pub mod debounce;
pub mod learning;
pub mod translator;
pub mod vocabulary;

pub use debounce::DebouncedTranslator;
pub use learning::LearningTracker;
pub use translator::{simulate_voice_input, tokenize, translate, Translation};
pub use vocabulary::Vocabulary;
