//! Error types for status reconciliation.

use thiserror::Error;

/// Errors that can occur while parsing or converting an order status.
///
/// The lenient conversions in [`reconciler`](crate::status::reconciler) absorb these
/// into the fallback status; the `try_*` conversions and
/// [`FallbackPolicy::Strict`](crate::status::FallbackPolicy::Strict) return them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatusError {
    /// The text is not the name of any member of either representation.
    #[error("Unknown order status: {value:?}")]
    Unknown { value: String },

    /// The source member has no member of the same name in the target representation.
    #[error("No {target} order status named {name}")]
    Unmapped {
        name: &'static str,
        target: &'static str,
    },
}
