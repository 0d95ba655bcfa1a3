use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::Subscriber;
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

pub type LogBuffer = Arc<Mutex<VecDeque<String>>>;

/// Tracing layer that keeps the most recent `capacity` events as display
/// lines for the Logs tab.
pub struct TuiLogLayer {
    buffer: LogBuffer,
    capacity: usize,
}

impl TuiLogLayer {
    pub fn new(buffer: LogBuffer, capacity: usize) -> Self {
        Self { buffer, capacity }
    }
}

/// Collects the message plus any structured fields as `key=value`.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        let _ = write!(self.fields, " {name}={value}");
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }
}

impl<S: Subscriber> Layer<S> for TuiLogLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let line = format!(
            "[{}] {}: {}{}",
            metadata.level(),
            metadata.target(),
            visitor.message,
            visitor.fields
        );

        if let Ok(mut buf) = self.buffer.lock() {
            while buf.len() >= self.capacity.max(1) {
                buf.pop_front();
            }
            buf.push_back(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    fn capture(capacity: usize, f: impl FnOnce()) -> Vec<String> {
        let buffer: LogBuffer = Arc::new(Mutex::new(VecDeque::new()));
        let subscriber = Registry::default().with(TuiLogLayer::new(Arc::clone(&buffer), capacity));
        tracing::subscriber::with_default(subscriber, f);
        let lines = buffer.lock().unwrap().iter().cloned().collect();
        lines
    }

    #[test]
    fn test_captures_level_target_and_message() {
        let lines = capture(10, || {
            tracing::info!(target: "ishara", "recognition started");
        });
        assert_eq!(lines, vec!["[INFO] ishara: recognition started"]);
    }

    #[test]
    fn test_structured_fields_are_appended() {
        let lines = capture(10, || {
            tracing::warn!(target: "ishara", word = "سعيد", tick = 3, "trained sign saved");
        });
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0],
            "[WARN] ishara: trained sign saved word=سعيد tick=3"
        );
    }

    #[test]
    fn test_oldest_lines_are_dropped() {
        let lines = capture(2, || {
            tracing::info!("first");
            tracing::info!("second");
            tracing::info!("third");
        });
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("second"), "got: {}", lines[0]);
        assert!(lines[1].ends_with("third"), "got: {}", lines[1]);
    }
}
