use ishara_core::AppConfig;
use ishara_lexicon::{simulate_voice_input, translate, DebouncedTranslator, Vocabulary};
use std::sync::Arc;

#[tokio::test(start_paused = true)]
async fn test_voice_input_flows_into_translation() {
    let config = AppConfig::default();
    let vocab = Arc::new(Vocabulary::builtin().unwrap());
    let translator = DebouncedTranslator::spawn(Arc::clone(&vocab), config.translation.debounce());

    let text = simulate_voice_input(
        config.translation.voice_delay(),
        &config.translation.voice_phrase,
    )
    .await;
    translator.translate_now(text);
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let latest = translator.latest();
    let tokens: Vec<&str> = latest.tokens.iter().map(|t| t.token.as_str()).collect();
    assert_eq!(tokens, vec!["مرحباً", "كيف", "الحال", "اليوم"]);
    assert!(latest.tokens[0].has_sign());
    // "الحال" is known but has no clip
    assert!(!latest.tokens[2].has_sign());
}

#[test]
fn test_config_extra_vocabulary_is_translated() {
    let config = AppConfig::from_toml_str(
        r#"
[vocabulary.extra]
"قهوة" = "https://mock-video-url/words/coffee.mp4"
"#,
    )
    .unwrap();
    let vocab = Vocabulary::builtin()
        .unwrap()
        .with_extra(&config.vocabulary.extra);

    let result = translate(&vocab, "قهوة ماء");
    assert_eq!(
        result.tokens[0].media_ref.as_deref(),
        Some("https://mock-video-url/words/coffee.mp4")
    );
    assert!(result.tokens[1].has_sign());
}
