//! Order status as exposed on the public API.

use super::macros::order_status;

order_status! {
    /// Lifecycle status of an order as returned to API clients.
    ///
    /// Serializes as its bare name, e.g. `"PENDING"`.
    pub enum OrderStatus as "external" {
        fallback Pending;
        Pending => "PENDING",
        Confirmed => "CONFIRMED",
        Processing => "PROCESSING",
        Shipped => "SHIPPED",
        Delivered => "DELIVERED",
        Cancelled => "CANCELLED",
        Refunded => "REFUNDED",
    }
}
