//! Request identity and the request-derived fields recorded in the diagnostic context.

use std::net::SocketAddr;
use uuid::Uuid;

/// Unique identifier for a single inbound request.
///
/// Backed by a random (v4) UUID, so collisions are negligible without any
/// coordination between threads or processes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wraps an identifier received from elsewhere, e.g. an upstream proxy header.
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The parts of an inbound HTTP request that are stamped onto its logs.
///
/// Every field is optional; absent fields are simply left out of the context.
///
/// # Example
/// ```
/// use storefront_support::context::RequestInfo;
///
/// let request = RequestInfo::new("GET", "/orders/42")
///     .with_remote_ip("203.0.113.9")
///     .with_user_agent("curl/8.5.0");
/// assert_eq!(request.method.as_deref(), Some("GET"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestInfo {
    pub remote_ip: Option<String>,
    pub user_agent: Option<String>,
    pub request_uri: Option<String>,
    pub method: Option<String>,
}

impl RequestInfo {
    /// Creates request info with the method and URI set.
    pub fn new(method: impl Into<String>, request_uri: impl Into<String>) -> Self {
        Self {
            method: Some(method.into()),
            request_uri: Some(request_uri.into()),
            ..Self::default()
        }
    }

    pub fn with_remote_ip(mut self, remote_ip: impl Into<String>) -> Self {
        self.remote_ip = Some(remote_ip.into());
        self
    }

    /// Sets the remote IP from a peer socket address, dropping the port.
    pub fn with_remote_addr(self, addr: SocketAddr) -> Self {
        self.with_remote_ip(addr.ip().to_string())
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_generation() {
        let id1 = RequestId::new();
        let id2 = RequestId::new();

        assert_ne!(id1, id2);
        // Hyphenated UUID
        assert_eq!(id1.as_str().len(), 36);
        assert!(Uuid::parse_str(id1.as_str()).is_ok());
    }

    #[test]
    fn test_request_id_display() {
        let id = RequestId::from_string("req-123".to_string());
        assert_eq!(id.to_string(), "req-123");
    }

    #[test]
    fn test_remote_addr_drops_port() {
        let addr: SocketAddr = "198.51.100.4:51234".parse().unwrap();
        let request = RequestInfo::default().with_remote_addr(addr);
        assert_eq!(request.remote_ip.as_deref(), Some("198.51.100.4"));
        assert!(request.method.is_none());
    }
}
