//! Process-level setup.
//!
//! This module contains the infrastructure a binary needs before it serves its
//! first request:
//!
//! - **Configuration**: Reading [`AppConfig`] from the environment
//! - **Observability setup**: Initializing tracing and logging
//! - **Log capture**: An in-memory subscriber for asserting on log output in tests
//!
//! # Main Components
//!
//! - [`AppConfig`] - Log profile and status fallback policy
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure
//! - [`capture::capture_events`] - Thread-scoped log capture

pub mod capture;
pub mod config;
pub mod logging;

pub use config::*;
pub use logging::*;
