//! # Status Reconciliation
//!
//! Converts order statuses between the persistence-facing
//! [`model::OrderStatus`] and the API-facing [`api::OrderStatus`], and parses
//! their string forms.
//!
//! ## Two Flavours
//!
//! - **Lenient** ([`to_external`], [`to_internal`], [`string_to_internal`],
//!   [`string_to_external`]): never fail. Anything that cannot be converted
//!   degrades to the fallback status (`PENDING`) and a `WARN` event records the
//!   rejected input.
//! - **Strict** ([`try_to_external`], [`try_to_internal`],
//!   [`try_string_to_internal`], [`try_string_to_external`]): the same lookups,
//!   returning a [`StatusError`] instead of degrading.
//!
//! [`StatusReconciler`] picks between the two according to a configured
//! [`FallbackPolicy`].
//!
//! ## Masking
//!
//! The lenient path treats an unrecognised status as `PENDING`. Callers that
//! accept statuses from untrusted input should prefer the strict path or
//! [`FallbackPolicy::Strict`], otherwise a typo in a client request silently
//! resets an order to `PENDING`.

use super::error::StatusError;
use super::{api, model};
use std::fmt::{Debug, Display};
use tracing::{debug, warn};

/// A status enumeration that can take part in name-based reconciliation.
///
/// Implemented by the [`order_status!`](super::macros) macro; there is no need to
/// implement it by hand.
pub trait StatusRepr: Copy + Debug + Display + Send + Sync + 'static {
    /// Substituted whenever a lenient conversion cannot determine a member.
    const FALLBACK: Self;

    /// Short name of the representation, used in error messages.
    const LABEL: &'static str;

    /// Exact member name.
    fn name(&self) -> &'static str;

    /// Looks a member up by exact name.
    fn from_name(name: &str) -> Option<Self>;
}

/// Converts `status` to the member of `T` with the same name.
pub fn reconcile<S: StatusRepr, T: StatusRepr>(status: S) -> Result<T, StatusError> {
    T::from_name(status.name()).ok_or(StatusError::Unmapped {
        name: status.name(),
        target: T::LABEL,
    })
}

/// Parses `text` as a `T`, falling back to parsing it as a `U` and reconciling.
fn parse_either<T: StatusRepr, U: StatusRepr>(text: &str) -> Result<T, StatusError> {
    if let Some(status) = T::from_name(text) {
        return Ok(status);
    }
    match U::from_name(text) {
        Some(other) => reconcile(other),
        None => Err(StatusError::Unknown {
            value: text.to_string(),
        }),
    }
}

fn or_fallback<T: StatusRepr>(result: Result<T, StatusError>) -> T {
    result.unwrap_or_else(|error| {
        let fallback = T::FALLBACK;
        warn!(%error, %fallback, representation = T::LABEL, "Order status fell back to default");
        fallback
    })
}

// --- Strict ---

/// Converts an internal status to the external member of the same name.
pub fn try_to_external(status: model::OrderStatus) -> Result<api::OrderStatus, StatusError> {
    reconcile(status)
}

/// Converts an external status to the internal member of the same name.
pub fn try_to_internal(status: api::OrderStatus) -> Result<model::OrderStatus, StatusError> {
    reconcile(status)
}

/// Parses `text` as an internal status, accepting external names as well.
pub fn try_string_to_internal(text: &str) -> Result<model::OrderStatus, StatusError> {
    parse_either::<model::OrderStatus, api::OrderStatus>(text)
}

/// Parses `text` as an external status, accepting internal names as well.
pub fn try_string_to_external(text: &str) -> Result<api::OrderStatus, StatusError> {
    parse_either::<api::OrderStatus, model::OrderStatus>(text)
}

// --- Lenient ---

/// Converts an internal status to its external counterpart, or `PENDING`.
pub fn to_external(status: model::OrderStatus) -> api::OrderStatus {
    or_fallback(try_to_external(status))
}

/// Converts an external status to its internal counterpart, or `PENDING`.
pub fn to_internal(status: api::OrderStatus) -> model::OrderStatus {
    or_fallback(try_to_internal(status))
}

/// Parses `text` as an internal status, or returns `PENDING`.
pub fn string_to_internal(text: &str) -> model::OrderStatus {
    or_fallback(try_string_to_internal(text))
}

/// Parses `text` as an external status, or returns `PENDING`.
pub fn string_to_external(text: &str) -> api::OrderStatus {
    or_fallback(try_string_to_external(text))
}

/// What to do with a status string that names no known member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Substitute the fallback status (`PENDING`). Compatible with legacy clients.
    #[default]
    Lenient,
    /// Reject the input with [`StatusError`].
    Strict,
}

/// Status parsing with a configured [`FallbackPolicy`].
///
/// # Example
///
/// ```
/// use storefront_support::status::{model, FallbackPolicy, StatusReconciler};
///
/// let lenient = StatusReconciler::new(FallbackPolicy::Lenient);
/// assert_eq!(lenient.resolve_internal("bogus"), Ok(model::OrderStatus::Pending));
///
/// let strict = StatusReconciler::new(FallbackPolicy::Strict);
/// assert!(strict.resolve_internal("bogus").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusReconciler {
    policy: FallbackPolicy,
}

impl StatusReconciler {
    pub fn new(policy: FallbackPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Parses an internal status under the configured policy.
    pub fn resolve_internal(&self, text: &str) -> Result<model::OrderStatus, StatusError> {
        self.apply(try_string_to_internal(text))
    }

    /// Parses an external status under the configured policy.
    pub fn resolve_external(&self, text: &str) -> Result<api::OrderStatus, StatusError> {
        self.apply(try_string_to_external(text))
    }

    fn apply<T: StatusRepr>(&self, result: Result<T, StatusError>) -> Result<T, StatusError> {
        match self.policy {
            FallbackPolicy::Lenient => Ok(or_fallback(result)),
            FallbackPolicy::Strict => result.inspect_err(|error| {
                debug!(%error, representation = T::LABEL, "Order status rejected");
            }),
        }
    }
}
