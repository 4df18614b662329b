//! In-memory event capture for logging assertions in tests
//!
//! Records every event's fields so a test can check which `op`/`event`
//! pairs a repository or schema call emitted, and with which error code.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ENTITY_ID, FIELD_ERR_CODE, FIELD_EVENT,
    FIELD_OP,
};

/// One recorded event
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    /// Every field as text; `Debug`-formatted values keep their quotes
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn op(&self) -> Option<&str> {
        self.field(FIELD_OP)
    }

    pub fn event(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }

    pub fn err_code(&self) -> Option<&str> {
        self.field(FIELD_ERR_CODE)
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.field(FIELD_ENTITY_ID)
    }
}

struct Fields<'a>(&'a mut BTreeMap<String, String>);

impl Visit for Fields<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

type Buffer = Arc<Mutex<Vec<CapturedEvent>>>;

/// Layer that appends every event to a shared buffer
pub struct TestCaptureLayer {
    buffer: Buffer,
}

impl TestCaptureLayer {
    pub fn new() -> (Self, TestCapture) {
        let buffer = Buffer::default();
        (
            Self {
                buffer: Arc::clone(&buffer),
            },
            TestCapture { buffer },
        )
    }
}

impl<S: Subscriber> Layer<S> for TestCaptureLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        event.record(&mut Fields(&mut fields));
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(CapturedEvent {
                level: *event.metadata().level(),
                fields,
            });
        }
    }
}

/// Read side of the capture buffer
#[derive(Clone)]
pub struct TestCapture {
    buffer: Buffer,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.buffer.lock().map(|b| b.clone()).unwrap_or_default()
    }

    /// Events for one operation name, in emission order
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op() == Some(op))
            .collect()
    }

    /// Error codes logged by `end_error` events of an operation
    pub fn error_codes_for_op(&self, op: &str) -> Vec<String> {
        self.events_for_op(op)
            .iter()
            .filter(|e| e.event() == Some(EVENT_END_ERROR))
            .filter_map(|e| e.err_code().map(str::to_string))
            .collect()
    }

    /// # Panics
    ///
    /// Panics when no event has this `op` and `event`
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let matching = self
            .events_for_op(op)
            .iter()
            .filter(|e| e.event() == Some(event))
            .count();
        assert!(
            matching > 0,
            "no {event} event for op {op} among {} captured events",
            self.events().len()
        );
    }

    /// # Panics
    ///
    /// Panics unless the operation logged a start followed by a successful end
    pub fn assert_op_completed(&self, op: &str) {
        let sequence: Vec<String> = self
            .events_for_op(op)
            .iter()
            .filter_map(|e| e.event().map(str::to_string))
            .collect();
        let start = sequence.iter().position(|e| e == EVENT_START);
        let end = sequence.iter().rposition(|e| e == EVENT_END);
        assert!(
            matches!((start, end), (Some(s), Some(e)) if s < e),
            "op {op} did not complete, saw {sequence:?}"
        );
    }

    pub fn clear(&self) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.clear();
        }
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber (first call only)
/// and return the shared handle
///
/// All tests in a binary share one buffer, so assert on an op name only
/// that test uses.
///
/// # Example
///
/// ```
/// use scoreboard_core::logging_facility::test_capture::init_test_capture;
/// use scoreboard_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example_op");
/// capture.assert_event_exists("doc_example_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::new();
            tracing_subscriber::registry().with(layer).init();
            capture
        })
        .clone()
}
