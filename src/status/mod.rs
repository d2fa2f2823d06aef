//! Order-status representations and the reconciliation between them.
//!
//! The persistence layer and the public API each carry their own `OrderStatus`
//! ([`model::OrderStatus`] and [`api::OrderStatus`]). They share one member list
//! but are distinct types, so every crossing between the layers goes through the
//! functions re-exported here.
//!
//! # Main Components
//!
//! - [`model`] / [`api`] - The two status enumerations
//! - [`reconciler`] - Lenient and strict conversions, [`StatusReconciler`]
//! - [`StatusError`] - Why a strict conversion failed

mod macros;

pub mod api;
pub mod error;
pub mod model;
pub mod reconciler;

pub use error::*;
pub use reconciler::*;
