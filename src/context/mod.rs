//! Per-request diagnostic context.
//!
//! Stamps a request id and a handful of request-derived fields onto every log
//! event emitted while a request is being served, without threading them through
//! every function signature.
//!
//! # Main Components
//!
//! - [`begin_request_context`] / [`end_request_context`] - Thread-scoped context for thread-per-request servers
//! - [`enter_request_context`] - The same, ended by a [`RequestContextGuard`] on drop
//! - [`scope`] / [`scope_with`] - Task-scoped context for async handlers
//! - [`get`], [`request_id`], [`snapshot`] - Reading the current context
//! - [`log_method_entry!`](crate::log_method_entry), [`log_method_exit!`](crate::log_method_exit),
//!   [`log_execution_time!`](crate::log_execution_time) - Debug-level trace helpers
//!
//! # Example
//!
//! ```
//! use storefront_support::context::{self, keys, RequestInfo};
//!
//! let request = RequestInfo::new("GET", "/orders/7").with_remote_ip("192.0.2.33");
//! {
//!     let _guard = context::enter_request_context(Some(&request));
//!     assert_eq!(context::get(keys::REQUEST_URI).as_deref(), Some("/orders/7"));
//!     assert!(context::request_id().is_some());
//! }
//! assert!(context::request_id().is_none());
//! ```
//!
//! # Hand-offs
//!
//! The context does not follow work onto another thread or into a newly spawned
//! task. Take a [`snapshot`] and re-install it on the other side:
//!
//! ```
//! use storefront_support::context;
//!
//! let _guard = context::enter_request_context(None);
//! let carried = context::snapshot().unwrap();
//! let id = context::request_id();
//!
//! std::thread::spawn(move || {
//!     let _guard = carried.install();
//!     assert_eq!(context::request_id(), id);
//! })
//! .join()
//! .unwrap();
//! ```

mod ambient;
pub mod diagnostic;
pub mod keys;
pub mod request;
pub mod trace;

pub use ambient::*;
pub use diagnostic::DiagnosticContext;
pub use request::{RequestId, RequestInfo};
