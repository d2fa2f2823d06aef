use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use storefront_support::context::{self, RequestInfo};
use storefront_support::runtime::capture::capture_events;
use storefront_support::{log_execution_time, log_method_entry, log_method_exit};
use tracing::level_filters::LevelFilter;
use tracing::Level;

/// Counts how often it is formatted.
struct Counted<'a>(&'a AtomicUsize);

impl fmt::Debug for Counted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fetch_add(1, Ordering::SeqCst);
        f.write_str("counted")
    }
}

#[test]
fn test_disabled_at_info_emits_nothing() {
    let (_guard, capture) = capture_events(LevelFilter::INFO);
    let formatted = AtomicUsize::new(0);

    let start = Instant::now();
    log_method_entry!("place_order", Counted(&formatted), 3);
    log_method_entry!("place_order");
    log_method_entry!(target: "checkout", "place_order");
    log_method_exit!("place_order", Counted(&formatted));
    log_method_exit!("place_order");
    log_execution_time!("place_order", start);

    assert!(capture.events().is_empty());
    assert_eq!(formatted.load(Ordering::SeqCst), 0);
}

#[test]
fn test_entry_exit_and_timing_at_debug() {
    let (_guard, capture) = capture_events(LevelFilter::DEBUG);

    let start = Instant::now() - Duration::from_millis(5);
    log_method_entry!("place_order", 42, "express");
    log_method_exit!("place_order", Some(1001));
    log_execution_time!("place_order", start);

    let events = capture.events();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.level == Level::DEBUG));
    assert!(events.iter().all(|e| e.field("method") == Some("place_order")));

    assert_eq!(events[0].message.as_deref(), Some("Entering method"));
    assert_eq!(events[0].field("args"), Some("42, \"express\""));

    assert_eq!(events[1].message.as_deref(), Some("Exiting method"));
    assert_eq!(events[1].field("result"), Some("Some(1001)"));

    assert_eq!(events[2].message.as_deref(), Some("Method execution time"));
    let elapsed: u64 = events[2]
        .field("elapsed_ms")
        .and_then(|v| v.parse().ok())
        .expect("elapsed_ms should be numeric");
    assert!(elapsed >= 5);
}

#[test]
fn test_exit_with_none_result_is_still_logged() {
    let (_guard, capture) = capture_events(LevelFilter::DEBUG);

    let missing: Option<u32> = None;
    log_method_exit!("find_order", missing);

    let events = capture.with_message("Exiting method");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field("result"), Some("None"));
}

#[test]
fn test_exit_without_result() {
    let (_guard, capture) = capture_events(LevelFilter::DEBUG);

    log_method_exit!("flush");

    let events = capture.with_message("Exiting method");
    assert_eq!(events.len(), 1);
    assert!(events[0].field("result").is_none());
}

#[test]
fn test_explicit_target() {
    let (_guard, capture) = capture_events(LevelFilter::DEBUG);

    log_method_entry!(target: "checkout", "place_order");

    let events = capture.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].target, "checkout");
    assert_eq!(events[0].field("args"), Some(""));
}

#[test]
fn test_default_target_is_calling_module() {
    let (_guard, capture) = capture_events(LevelFilter::DEBUG);

    log_method_exit!("flush");

    assert_eq!(capture.events()[0].target, module_path!());
}

#[test]
fn test_trace_lines_carry_request_id() {
    let (_guard, capture) = capture_events(LevelFilter::DEBUG);

    let request = RequestInfo::new("GET", "/orders/3");
    let id = context::begin_request_context(Some(&request));
    log_method_entry!("get_order", 3);
    context::end_request_context();

    let events = capture.with_message("Entering method");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field("request_id"), Some(id.as_str()));
    // The span's own `method` field is shadowed by the event's
    assert_eq!(events[0].field("method"), Some("get_order"));
}
