//! Method entry/exit/timing trace macros.
//!
//! All three macros emit at `DEBUG` and check [`tracing::enabled!`] first, so
//! with debug logging off they neither format their arguments nor emit anything.
//! Each accepts an optional leading `target: "..."`; it defaults to the calling
//! module's path. The target must be a constant, as for any `tracing` macro.
//!
//! Events emitted inside a request context inherit its `request` span, so the
//! request id and friends show up on these lines without being passed in.
//!
//! ```
//! use std::time::Instant;
//! use storefront_support::{log_execution_time, log_method_entry, log_method_exit};
//!
//! fn total(prices: &[u32]) -> u32 {
//!     let start = Instant::now();
//!     log_method_entry!("total", prices);
//!     let sum: u32 = prices.iter().sum();
//!     log_method_exit!("total", sum);
//!     log_execution_time!("total", start);
//!     sum
//! }
//! # assert_eq!(total(&[1, 2]), 3);
//! ```

use std::fmt::Debug;
use std::time::Instant;

/// Renders arguments as `Debug`, comma-separated. Used by [`log_method_entry!`].
#[doc(hidden)]
pub fn join_args(args: &[&dyn Debug]) -> String {
    args.iter()
        .map(|arg| format!("{arg:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Whole milliseconds elapsed since `start`, saturating.
pub fn elapsed_millis(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Logs entry into `method` with its arguments.
///
/// ```
/// # use storefront_support::log_method_entry;
/// log_method_entry!("place_order", 42, "express");
/// log_method_entry!(target: "checkout", "place_order");
/// ```
#[macro_export]
macro_rules! log_method_entry {
    (target: $target:expr, $method:expr $(, $arg:expr)* $(,)?) => {
        if $crate::__private::tracing::enabled!(target: $target, $crate::__private::tracing::Level::DEBUG) {
            let args: &[&dyn ::std::fmt::Debug] = &[$(&$arg),*];
            $crate::__private::tracing::debug!(
                target: $target,
                method = $method,
                args = %$crate::context::trace::join_args(args),
                "Entering method"
            );
        }
    };
    ($method:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_method_entry!(target: module_path!(), $method $(, $arg)*)
    };
}

/// Logs exit from `method`, with its result when one is given.
///
/// Leaving out the result is the only way to log an exit without one. A result
/// of `None` is still logged, as `result=None`.
///
/// ```
/// # use storefront_support::log_method_exit;
/// log_method_exit!("place_order", Some(1001));
/// log_method_exit!("flush");
/// ```
#[macro_export]
macro_rules! log_method_exit {
    (target: $target:expr, $method:expr, $result:expr $(,)?) => {
        if $crate::__private::tracing::enabled!(target: $target, $crate::__private::tracing::Level::DEBUG) {
            $crate::__private::tracing::debug!(
                target: $target,
                method = $method,
                result = ?$result,
                "Exiting method"
            );
        }
    };
    (target: $target:expr, $method:expr $(,)?) => {
        if $crate::__private::tracing::enabled!(target: $target, $crate::__private::tracing::Level::DEBUG) {
            $crate::__private::tracing::debug!(target: $target, method = $method, "Exiting method");
        }
    };
    ($method:expr, $result:expr $(,)?) => {
        $crate::log_method_exit!(target: module_path!(), $method, $result)
    };
    ($method:expr $(,)?) => {
        $crate::log_method_exit!(target: module_path!(), $method)
    };
}

/// Logs the milliseconds elapsed since `start` (a [`std::time::Instant`]).
#[macro_export]
macro_rules! log_execution_time {
    (target: $target:expr, $method:expr, $start:expr $(,)?) => {
        if $crate::__private::tracing::enabled!(target: $target, $crate::__private::tracing::Level::DEBUG) {
            let elapsed_ms = $crate::context::trace::elapsed_millis($start);
            $crate::__private::tracing::debug!(
                target: $target,
                method = $method,
                elapsed_ms,
                "Method execution time"
            );
        }
    };
    ($method:expr, $start:expr $(,)?) => {
        $crate::log_execution_time!(target: module_path!(), $method, $start)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_join_args() {
        assert_eq!(join_args(&[]), "");
        assert_eq!(join_args(&[&1, &"two", &Some(3.5)]), "1, \"two\", Some(3.5)");
    }

    #[test]
    fn test_elapsed_millis_counts_up() {
        let start = Instant::now() - Duration::from_millis(25);
        assert!(elapsed_millis(start) >= 25);
    }
}
