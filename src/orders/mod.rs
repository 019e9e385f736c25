//! Order sync against the Daraz Open Platform.
//!
//! Lists the orders created after a cutoff, fetches the items of each order
//! and records them as structured log events.
//!
//! # Overview
//!
//! - [`get_orders`]: `GET /orders/get`
//! - [`get_order_items`]: `GET /order/items/get`
//! - [`sync_orders`]: the full listing and item loop, returning a [`SyncReport`]
//!
//! # Example
//!
//! ```rust,ignore
//! use daraz_sdk::orders::sync_orders;
//!
//! let report = sync_orders(&client, &tokens.access_token, config.orders_created_after()).await?;
//! println!("{} items, {} orders skipped", report.items.len(), report.skipped.len());
//! ```

mod sync;
mod types;

pub use sync::{
    format_created_after, get_order_items, get_orders, sync_orders, ORDERS_PATH, ORDER_ITEMS_PATH,
};
pub use types::{OrderItem, OrderSummary, SkippedOrder, SyncReport};

use thiserror::Error;

use crate::clients::ApiError;

/// Errors that end an order sync.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The platform rejected the order listing.
    #[error("Daraz API error {code}: {message}")]
    Api {
        /// The platform status code.
        code: String,
        /// The platform status message.
        message: String,
    },

    /// A call failed at the transport level.
    #[error(transparent)]
    Transport(#[from] ApiError),

    /// A response did not have the expected shape.
    #[error("Malformed Daraz response: {reason}")]
    Malformed {
        /// What was wrong with the response.
        reason: String,
    },
}

// Verify SyncError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SyncError>();
    assert_send_sync::<SyncReport>();
};
