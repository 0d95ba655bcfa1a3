use crate::translator::{translate, Translation};
use crate::vocabulary::Vocabulary;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

enum DebounceInput {
    Typed(String),
    Immediate(String),
}

/// Recomputes the translation only after input has been quiet for a while.
///
/// Typed input restarts the quiet period; [`translate_now`](Self::translate_now)
/// publishes at once and drops whatever was pending.
pub struct DebouncedTranslator {
    input_tx: mpsc::UnboundedSender<DebounceInput>,
    output_rx: watch::Receiver<Translation>,
    published: Arc<AtomicU64>,
    task_handle: tokio::task::JoinHandle<()>,
}

impl DebouncedTranslator {
    pub fn spawn(vocab: Arc<Vocabulary>, quiet_period: Duration) -> Self {
        let (input_tx, mut input_rx) = mpsc::unbounded_channel();
        let (output_tx, output_rx) = watch::channel(Translation::default());
        let published = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&published);

        let task_handle = tokio::spawn(async move {
            let mut pending: Option<String> = None;
            let sleep = tokio::time::sleep(quiet_period);
            tokio::pin!(sleep);

            let publish = |text: &str| {
                output_tx.send_replace(translate(&vocab, text));
                counter.fetch_add(1, Ordering::Relaxed);
            };

            loop {
                tokio::select! {
                    msg = input_rx.recv() => {
                        match msg {
                            Some(DebounceInput::Typed(text)) => {
                                pending = Some(text);
                                sleep.as_mut().reset(Instant::now() + quiet_period);
                            }
                            Some(DebounceInput::Immediate(text)) => {
                                pending = None;
                                publish(&text);
                            }
                            None => break,
                        }
                    }
                    () = &mut sleep, if pending.is_some() => {
                        if let Some(text) = pending.take() {
                            publish(&text);
                        }
                    }
                }
            }
            tracing::debug!("debounced translator input closed");
        });

        Self {
            input_tx,
            output_rx,
            published,
            task_handle,
        }
    }

    /// Feed the current contents of the input field.
    pub fn input(&self, text: impl Into<String>) {
        let _ = self.input_tx.send(DebounceInput::Typed(text.into()));
    }

    /// Translate without waiting for the quiet period.
    pub fn translate_now(&self, text: impl Into<String>) {
        let _ = self.input_tx.send(DebounceInput::Immediate(text.into()));
    }

    pub fn subscribe(&self) -> watch::Receiver<Translation> {
        self.output_rx.clone()
    }

    pub fn latest(&self) -> Translation {
        self.output_rx.borrow().clone()
    }

    /// Number of translations published so far.
    pub fn publish_count(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}

impl Drop for DebouncedTranslator {
    fn drop(&mut self) {
        self.task_handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn(quiet_ms: u64) -> DebouncedTranslator {
        let vocab = Arc::new(Vocabulary::builtin().unwrap());
        DebouncedTranslator::spawn(vocab, Duration::from_millis(quiet_ms))
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_publishes_once_with_last_input() {
        let translator = spawn(600);
        translator.input("م");
        tokio::time::sleep(Duration::from_millis(100)).await;
        translator.input("مرحباً");
        tokio::time::sleep(Duration::from_millis(100)).await;
        translator.input("مرحباً كيف");
        tokio::time::sleep(Duration::from_millis(700)).await;

        assert_eq!(translator.publish_count(), 1);
        let latest = translator.latest();
        assert_eq!(latest.tokens.len(), 2);
        assert_eq!(latest.tokens[1].token, "كيف");
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_published_before_quiet_period() {
        let translator = spawn(600);
        translator.input("نعم");
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(translator.publish_count(), 0);
        assert!(translator.latest().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_translate_now_skips_debounce() {
        let translator = spawn(600);
        translator.input("لا");
        translator.translate_now("نعم");
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(translator.publish_count(), 1);
        assert_eq!(translator.latest().tokens[0].token, "نعم");

        // the pending typed input was dropped
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(translator.publish_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_input_clears_translation() {
        let translator = spawn(600);
        translator.translate_now("أنا بخير");
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!translator.latest().is_empty());

        translator.input("   ");
        tokio::time::sleep(Duration::from_millis(700)).await;
        let latest = translator.latest();
        assert!(latest.is_empty());
        assert!(latest.status.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribe_sees_change() {
        let translator = spawn(50);
        let mut rx = translator.subscribe();
        translator.input("شكراً");
        tokio::time::timeout(Duration::from_secs(1), rx.changed())
            .await
            .expect("timed out")
            .expect("sender dropped");
        assert_eq!(rx.borrow().tokens[0].token, "شكراً");
    }
}
