#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Storefront Support
//!
//! > **Order status reconciliation and request-scoped logging for a storefront backend.**
//!
//! Two small pieces of plumbing that every request handler in the storefront touches:
//! translating order statuses between the persistence model and the public API, and
//! stamping every log line with the request it belongs to.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Two enums, one list
//!
//! The stored [`model::OrderStatus`](status::model::OrderStatus) and the wire-facing
//! [`api::OrderStatus`](status::api::OrderStatus) are separate types so either side can
//! evolve on its own schedule. Both are generated from the same `order_status!` macro,
//! and conversion goes by member name, so adding a member to one side and forgetting the
//! other shows up as a [`StatusError::Unmapped`](status::StatusError::Unmapped) instead of
//! a silent mis-mapping.
//!
//! ### Never fail a request over a status
//!
//! The lenient conversions ([`to_external`](status::to_external),
//! [`string_to_internal`](status::string_to_internal), ...) always return a value and fall
//! back to `PENDING`. Every fallback is logged at `WARN`. Callers that would rather see the
//! error use the `try_*` variants or a [`StatusReconciler`](status::StatusReconciler) with
//! [`FallbackPolicy::Strict`](status::FallbackPolicy::Strict).
//!
//! ## 🚀 Core Concepts
//!
//! ### Request context
//!
//! [`context::begin_request_context`] generates a request id, captures the client address,
//! user agent, URI and method, and opens a `request` span. Until the context ends, every
//! `tracing` event on that thread carries those fields. Async handlers use
//! [`context::scope`] instead, which binds the context to the task rather than the thread.
//!
//! ### Method tracing
//!
//! [`log_method_entry!`], [`log_method_exit!`] and [`log_execution_time!`] emit at `DEBUG`
//! and cost one level check when debug logging is off.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. Statuses ([`status`])
//! - **Key items**: [`StatusRepr`](status::StatusRepr), [`StatusReconciler`](status::StatusReconciler),
//!   [`StatusError`](status::StatusError).
//!
//! ### 2. Request context ([`context`])
//! - **Key items**: [`RequestInfo`](context::RequestInfo), [`DiagnosticContext`](context::DiagnosticContext),
//!   [`RequestContextGuard`](context::RequestContextGuard), [`context::keys`].
//!
//! ### 3. Runtime ([`runtime`])
//! - **Key items**: [`AppConfig`](runtime::AppConfig), [`setup_tracing`](runtime::setup_tracing),
//!   [`capture`](runtime::capture).
//!
//! ## 🚀 Quick Start
//!
//! ### Running the Demo
//!
//! ```bash
//! # Include method entry/exit lines
//! RUST_LOG=debug cargo run
//!
//! # JSON output, strict status handling
//! STOREFRONT_LOG_PROFILE=production STOREFRONT_STATUS_POLICY=strict cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod context;
pub mod runtime;
pub mod status;

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}
