//! # Storefront Support Demo
//!
//! Walks through the two halves of the crate:
//!
//! 1.  A few thread-per-request "handlers" that each open a request context,
//!     resolve an order status sent by a client, and answer with its API form.
//! 2.  An async handler doing the same inside [`context::scope`].
//!
//! Run with `RUST_LOG=debug` to see the method entry/exit/timing lines, each
//! tagged with the request it belongs to.

use std::thread;
use std::time::Instant;
use storefront_support::context::{self, RequestInfo};
use storefront_support::runtime::{setup_tracing, AppConfig};
use storefront_support::status::{self, api, StatusError, StatusReconciler};
use storefront_support::{log_execution_time, log_method_entry, log_method_exit};
use tracing::{error, info, warn};

/// Resolves a client-supplied status and returns what the API would send back.
fn update_order_status(
    reconciler: &StatusReconciler,
    order_id: u64,
    requested: &str,
) -> Result<api::OrderStatus, StatusError> {
    let start = Instant::now();
    log_method_entry!("update_order_status", order_id, requested);

    let stored = reconciler.resolve_internal(requested)?;
    info!(order_id, status = %stored, "Order status updated");
    let response = status::to_external(stored);

    log_method_exit!("update_order_status", response);
    log_execution_time!("update_order_status", start);
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = AppConfig::from_env().map_err(|e| e.to_string())?;

    // Setup tracing once for the entire application
    setup_tracing(config.log_profile);

    info!(
        profile = config.log_profile.as_str(),
        policy = ?config.status_policy,
        "Starting storefront support demo"
    );

    let reconciler = StatusReconciler::new(config.status_policy);

    let requests = [
        (1001, "CONFIRMED", "198.51.100.7", "storefront-web/2.3"),
        (1002, "SHIPPED", "198.51.100.8", "storefront-ios/5.1"),
        (1003, "on-hold", "203.0.113.40", "legacy-batch/0.9"),
    ];

    // Thread-per-request: each worker owns its context for the life of the request
    let workers: Vec<_> = requests
        .into_iter()
        .map(|(order_id, requested, ip, agent)| {
            thread::spawn(move || {
                let request = RequestInfo::new("PUT", format!("/orders/{order_id}/status"))
                    .with_remote_ip(ip)
                    .with_user_agent(agent);
                let _guard = context::enter_request_context(Some(&request));

                match update_order_status(&reconciler, order_id, requested) {
                    Ok(response) => info!(order_id, %response, "Responded"),
                    Err(e) => warn!(order_id, error = %e, "Rejected status update"),
                }
            })
        })
        .collect();

    for worker in workers {
        if worker.join().is_err() {
            error!("Request worker panicked");
        }
    }

    // Async handler: the context follows the task rather than the thread
    let request = RequestInfo::new("GET", "/orders/1004").with_remote_ip("192.0.2.55");
    let response = context::scope(Some(&request), async {
        let response = status::string_to_external("DELIVERED");
        tokio::task::yield_now().await;
        info!(%response, request_id = ?context::request_id(), "Order fetched");
        response
    })
    .await;

    info!(%response, "Application completed successfully");
    Ok(())
}
