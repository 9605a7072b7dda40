//! In-memory capture of log events for assertions
//!
//! [`init_test_capture`] installs a process-global layer that records every
//! event. Tests in the same binary share it, so assertions should filter on
//! an operation name or field value only that test produces.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

use wookie_core_types::schema::{FIELD_COMPONENT, FIELD_EVENT, FIELD_OP};

/// One recorded event; every field value is kept in its rendered form
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn from_fields(level: Level, fields: HashMap<String, String>) -> Self {
        CapturedEvent {
            level,
            component: fields.get(FIELD_COMPONENT).cloned(),
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

/// Renders strings unquoted and everything else through `Debug`
#[derive(Default)]
struct Recorder(HashMap<String, String>);

impl Recorder {
    fn put(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_owned(), value);
    }
}

impl Visit for Recorder {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_owned());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }
}

type Sink = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer(Sink);

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = Recorder::default();
        event.record(&mut recorder);
        let captured = CapturedEvent::from_fields(*event.metadata().level(), recorder.0);
        if let Ok(mut sink) = self.0.lock() {
            sink.push(captured);
        }
    }
}

/// Read side of the global capture
#[derive(Clone)]
pub struct TestCapture(Sink);

impl TestCapture {
    /// Snapshot of everything captured so far
    pub fn events(&self) -> Vec<CapturedEvent> {
        match self.0.lock() {
            Ok(sink) => sink.clone(),
            Err(_) => Vec::new(),
        }
    }

    /// Events emitted for one operation, in emission order
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        let mut events = self.events();
        events.retain(|e| e.op.as_deref() == Some(op));
        events
    }

    /// # Panics
    ///
    /// Panics if no event with this `op` and `event` was captured.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "no {}/{} event among {} captured",
            op,
            event,
            events.len()
        );
    }

    pub fn count_events(&self, predicate: impl Fn(&CapturedEvent) -> bool) -> usize {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer on first call and hand out its reader
///
/// # Example
///
/// ```
/// use wookie_core::logging_facility::test_capture::init_test_capture;
/// use wookie_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_capture_example");
/// capture.assert_event_exists("doc_capture_example", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let sink: Sink = Arc::default();
            // Another subscriber may already own the global slot in this process.
            let _ = tracing_subscriber::registry()
                .with(CaptureLayer(Arc::clone(&sink)))
                .try_init();
            TestCapture(sink)
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_fields_are_split_out() {
        let fields = HashMap::from([
            (FIELD_OP.to_string(), "remove_widget_type".to_string()),
            (FIELD_EVENT.to_string(), "end".to_string()),
            ("widget_id".to_string(), "7".to_string()),
        ]);
        let event = CapturedEvent::from_fields(Level::INFO, fields);

        assert!(event.is("remove_widget_type", "end"));
        assert!(!event.is("remove_widget_type", "start"));
        assert_eq!(event.component, None);
        assert_eq!(event.field("widget_id"), Some("7"));
        assert_eq!(event.field("service_type"), None);
    }
}
