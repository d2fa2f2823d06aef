//! Order status as stored by the persistence layer.

use super::macros::order_status;

order_status! {
    /// Lifecycle status of an order as persisted.
    ///
    /// Mirrors [`api::OrderStatus`](crate::status::api::OrderStatus) member for member.
    /// Convert between the two with [`to_external`](crate::status::to_external) and
    /// [`to_internal`](crate::status::to_internal) rather than matching by hand.
    pub enum OrderStatus as "internal" {
        fallback Pending;
        /// Placed but not yet confirmed.
        Pending => "PENDING",
        /// Payment accepted.
        Confirmed => "CONFIRMED",
        /// Being picked and packed.
        Processing => "PROCESSING",
        /// Handed to the carrier.
        Shipped => "SHIPPED",
        /// Received by the customer.
        Delivered => "DELIVERED",
        /// Cancelled before shipment.
        Cancelled => "CANCELLED",
        /// Money returned to the customer.
        Refunded => "REFUNDED",
    }
}
