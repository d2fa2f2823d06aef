//! Fixed diagnostic context keys.
//!
//! These are the names under which request fields are stored and looked up with
//! [`get`](crate::context::get). The matching span fields use snake_case
//! (`request_id`, `remote_ip`, ...), see [`span_field`].

pub const REQUEST_ID: &str = "requestId";
pub const REMOTE_IP: &str = "remoteIp";
pub const USER_AGENT: &str = "userAgent";
pub const REQUEST_URI: &str = "requestURI";
pub const METHOD: &str = "method";

/// Every key, in the order they are populated.
pub const ALL: [&str; 5] = [REQUEST_ID, REMOTE_IP, USER_AGENT, REQUEST_URI, METHOD];

/// Name of the `request` span field that mirrors `key`.
pub fn span_field(key: &str) -> Option<&'static str> {
    match key {
        REQUEST_ID => Some("request_id"),
        REMOTE_IP => Some("remote_ip"),
        USER_AGENT => Some("user_agent"),
        REQUEST_URI => Some("request_uri"),
        METHOD => Some("method"),
        _ => None,
    }
}
