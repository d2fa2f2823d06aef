//! In-memory log capture for assertions in tests.
//!
//! [`capture_events`] installs a subscriber as the *thread's* default for as
//! long as the returned guard lives, so tests running in parallel each see only
//! their own events. Every captured event carries the fields of the spans it
//! was emitted in, which is how tests observe the request context on log lines.
//!
//! ```
//! use storefront_support::runtime::capture::capture_events;
//! use tracing::level_filters::LevelFilter;
//!
//! let (_guard, capture) = capture_events(LevelFilter::INFO);
//! tracing::info!(order_id = 7, "Order shipped");
//! tracing::debug!("filtered out");
//!
//! let events = capture.events();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].message.as_deref(), Some("Order shipped"));
//! assert_eq!(events[0].fields.get("order_id").map(String::as_str), Some("7"));
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::dispatcher::DefaultGuard;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// A captured log event.
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub message: Option<String>,
    /// The event's own fields, excluding `message`.
    pub fields: HashMap<String, String>,
    /// Fields of the enclosing spans, innermost winning on name clashes.
    pub span_fields: HashMap<String, String>,
}

impl CapturedEvent {
    /// Looks a field up on the event first, then on its spans.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .or_else(|| self.span_fields.get(name))
            .map(String::as_str)
    }
}

struct FieldVisitor<'a>(&'a mut HashMap<String, String>);

impl Visit for FieldVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

/// Span extension holding the fields recorded on a span so far.
struct SpanFields(HashMap<String, String>);

/// Layer that appends every event it sees to a shared buffer.
pub struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureLayer {
    /// Creates a layer together with the handle that reads what it captures.
    pub fn pair() -> (Self, TestCapture) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let layer = Self {
            events: events.clone(),
        };
        (layer, TestCapture { events })
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        attrs.record(&mut FieldVisitor(&mut fields));
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(SpanFields(fields));
        }
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            let mut extensions = span.extensions_mut();
            if let Some(SpanFields(fields)) = extensions.get_mut::<SpanFields>() {
                values.record(&mut FieldVisitor(fields));
            }
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut fields = HashMap::new();
        event.record(&mut FieldVisitor(&mut fields));
        let message = fields.remove("message");

        let mut span_fields = HashMap::new();
        if let Some(scope) = ctx.event_scope(event) {
            for span in scope.from_root() {
                if let Some(SpanFields(recorded)) = span.extensions().get::<SpanFields>() {
                    span_fields.extend(recorded.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
            }
        }

        let captured = CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message,
            fields,
            span_fields,
        };

        self.events
            .lock()
            .map(|mut events| events.push(captured))
            .ok();
    }
}

/// Handle for reading captured events.
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    /// All events captured so far, oldest first.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events whose message equals `message`.
    pub fn with_message(&self, message: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.message.as_deref() == Some(message))
            .collect()
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    pub fn clear(&self) {
        self.events.lock().map(|mut e| e.clear()).ok();
    }
}

/// Captures events at `level` and above on the current thread until the guard drops.
///
/// Only the thread's default dispatcher is touched; no global `log` logger is
/// installed, so [`setup_tracing`](super::setup_tracing) can still run later.
pub fn capture_events(level: LevelFilter) -> (DefaultGuard, TestCapture) {
    let (layer, capture) = CaptureLayer::pair();
    let subscriber = tracing_subscriber::registry().with(level).with(layer);
    let guard = tracing::subscriber::set_default(subscriber);
    (guard, capture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_span_fields() {
        let (_guard, capture) = capture_events(LevelFilter::DEBUG);

        let span = tracing::info_span!("checkout", cart_id = 12, customer = tracing::field::Empty);
        span.record("customer", "alice");
        span.in_scope(|| tracing::warn!(attempt = 2, "Payment retried"));

        let events = capture.with_message("Payment retried");
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.level, Level::WARN);
        assert_eq!(event.field("attempt"), Some("2"));
        assert_eq!(event.field("cart_id"), Some("12"));
        assert_eq!(event.field("customer"), Some("alice"));
    }

    #[test]
    fn test_pair_with_scoped_dispatch() {
        let (layer, capture) = CaptureLayer::pair();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(code = 503, "Upstream unavailable");
        });
        tracing::error!("after the scope");

        let events = capture.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].field("code"), Some("503"));
    }

    #[test]
    fn test_clear() {
        let (_guard, capture) = capture_events(LevelFilter::TRACE);
        tracing::info!("one");
        assert_eq!(capture.count_events(|_| true), 1);
        capture.clear();
        assert!(capture.events().is_empty());
    }
}
