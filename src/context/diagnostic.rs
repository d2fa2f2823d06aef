//! The per-request diagnostic key/value map.

use super::keys;
use super::request::{RequestId, RequestInfo};
use std::collections::BTreeMap;
use tracing::field::Empty;
use tracing::{error_span, Span};

/// Diagnostic fields for one request, keyed by the constants in [`keys`].
///
/// A `DiagnosticContext` is a plain value: it only becomes ambient once it is
/// installed on a thread ([`install`](Self::install)) or scoped to a task
/// ([`scope_with`](crate::context::scope_with)). Cloning one is how a context is
/// carried across a thread or task hand-off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticContext {
    entries: BTreeMap<&'static str, String>,
}

impl DiagnosticContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the context for a new request: a fresh [`RequestId`] plus whatever
    /// fields `request` carries.
    pub fn for_request(request: Option<&RequestInfo>) -> (RequestId, Self) {
        let request_id = RequestId::new();
        let mut context = Self::new();
        context.insert(keys::REQUEST_ID, request_id.as_str());

        if let Some(request) = request {
            let fields = [
                (keys::REMOTE_IP, &request.remote_ip),
                (keys::USER_AGENT, &request.user_agent),
                (keys::REQUEST_URI, &request.request_uri),
                (keys::METHOD, &request.method),
            ];
            for (key, value) in fields {
                if let Some(value) = value {
                    context.insert(key, value.as_str());
                }
            }
        }

        (request_id, context)
    }

    pub fn insert(&mut self, key: &'static str, value: impl Into<String>) {
        self.entries.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn request_id(&self) -> Option<&str> {
        self.get(keys::REQUEST_ID)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.entries.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Creates the `request` span that carries these fields onto every event
    /// emitted inside it.
    ///
    /// The span is at `ERROR` so that it is enabled whenever any event is, and
    /// a `warn`-level filter still sees the request fields.
    pub fn span(&self) -> Span {
        let span = error_span!(
            "request",
            request_id = Empty,
            remote_ip = Empty,
            user_agent = Empty,
            request_uri = Empty,
            method = Empty,
        );
        for (key, value) in self.iter() {
            if let Some(field) = keys::span_field(key) {
                span.record(field, value);
            }
        }
        span
    }

    /// Makes this context the current thread's context until the returned guard drops.
    pub fn install(self) -> super::RequestContextGuard {
        super::ambient::install(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_request_only_id_is_stored() {
        let (id, context) = DiagnosticContext::for_request(None);
        assert_eq!(context.len(), 1);
        assert_eq!(context.request_id(), Some(id.as_str()));
    }

    #[test]
    fn test_with_request_all_fields_stored() {
        let request = RequestInfo::new("POST", "/orders")
            .with_remote_ip("192.0.2.1")
            .with_user_agent("storefront-test");
        let (_, context) = DiagnosticContext::for_request(Some(&request));

        assert_eq!(context.len(), 5);
        assert_eq!(context.get(keys::METHOD), Some("POST"));
        assert_eq!(context.get(keys::REQUEST_URI), Some("/orders"));
        assert_eq!(context.get(keys::REMOTE_IP), Some("192.0.2.1"));
        assert_eq!(context.get(keys::USER_AGENT), Some("storefront-test"));
    }

    #[test]
    fn test_absent_request_fields_are_omitted() {
        let request = RequestInfo::new("GET", "/health");
        let (_, context) = DiagnosticContext::for_request(Some(&request));

        assert_eq!(context.len(), 3);
        assert!(context.get(keys::USER_AGENT).is_none());
        assert!(context.get(keys::REMOTE_IP).is_none());
    }

    #[test]
    fn test_each_request_gets_a_fresh_id() {
        let (first, _) = DiagnosticContext::for_request(None);
        let (second, _) = DiagnosticContext::for_request(None);
        assert_ne!(first, second);
    }
}
