use ishara_core::config::{PoseConfig, RecognitionConfig, TrainingConfig};
use ishara_core::{RecognitionOutcome, TrainingPhase};
use ishara_engine::{
    PoseCapability, PoseRegistry, RecognitionSimulator, StdRandom, SyntheticCamera,
    TrainingSession,
};
use ishara_ledger::{MemoryStore, SignLedger};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn shared_ledger() -> Arc<Mutex<SignLedger>> {
    let ledger = SignLedger::load(Arc::new(MemoryStore::new()), "savedSignsList", "%H:%M");
    Arc::new(Mutex::new(ledger))
}

#[tokio::test(start_paused = true)]
async fn test_trained_word_is_recognized() {
    let ledger = shared_ledger();

    let mut session = TrainingSession::new(TrainingConfig::default());
    session.set_target_word("شكراً");
    session.start_recording("شكراً").unwrap();
    tokio::time::sleep(Duration::from_millis(5200)).await;
    assert_eq!(session.snapshot().phase, TrainingPhase::Captured);
    {
        let mut guard = ledger.lock().unwrap();
        session.save(&mut guard).unwrap();
    }

    let sim = RecognitionSimulator::new(
        RecognitionConfig::default(),
        Arc::clone(&ledger),
        PoseCapability::unavailable("none"),
        Arc::new(SyntheticCamera::default()),
    );
    let handle = sim.start(Box::new(StdRandom::seeded(3)));
    tokio::time::sleep(Duration::from_millis(3100)).await;

    let transcript = handle.stop();
    assert_eq!(
        transcript[0].outcome,
        RecognitionOutcome::TrainedWord("شكراً".to_string())
    );
    assert!(transcript[0].outcome.to_string().contains("شكراً"));
}

#[tokio::test(start_paused = true)]
async fn test_configured_estimator_drives_recognition() {
    let config: PoseConfig = toml::from_str(
        r#"
estimator = "scripted"
scores = [0.95, 0.05]
"#,
    )
    .unwrap();
    let pose = PoseCapability::load(Some(&config), &PoseRegistry::new()).await;
    assert!(pose.is_available());

    let sim = RecognitionSimulator::new(
        RecognitionConfig::default(),
        shared_ledger(),
        pose,
        Arc::new(SyntheticCamera::default()),
    );
    let handle = sim.start(Box::new(StdRandom::seeded(1)));
    tokio::time::sleep(Duration::from_millis(6100)).await;

    let outcomes: Vec<_> = handle.stop().into_iter().map(|e| e.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            RecognitionOutcome::NoClearSign,
            RecognitionOutcome::LikelySign,
            RecognitionOutcome::Preparing,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_unknown_estimator_falls_back() {
    let config: PoseConfig = toml::from_str(r#"estimator = "movenet""#).unwrap();
    let pose = PoseCapability::load(Some(&config), &PoseRegistry::new()).await;
    assert!(!pose.is_available());

    let sim = RecognitionSimulator::new(
        RecognitionConfig::default(),
        shared_ledger(),
        pose,
        Arc::new(SyntheticCamera::default()),
    );
    let handle = sim.start(Box::new(StdRandom::seeded(1)));
    tokio::time::sleep(Duration::from_millis(3100)).await;
    assert_eq!(
        handle.transcript()[0].outcome,
        RecognitionOutcome::NoTrainedWords
    );
}
