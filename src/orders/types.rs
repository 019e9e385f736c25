//! Order and order item records.

use serde::{Deserialize, Serialize};

/// One entry of the `data.orders` array returned by `/orders/get`.
///
/// Numeric identifiers are kept as strings so they can be passed back to
/// the API unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Order identifier.
    #[serde(deserialize_with = "required_scalar")]
    pub order_id: String,
    /// Seller-facing order number.
    #[serde(default, deserialize_with = "crate::clients::scalar_string")]
    pub order_number: Option<String>,
    /// Creation time as reported by the platform.
    #[serde(default, deserialize_with = "crate::clients::scalar_string")]
    pub created_at: Option<String>,
    /// Item statuses contained in the order.
    #[serde(default)]
    pub statuses: Vec<String>,
}

/// The fields of an order item that the sync records.
///
/// Every field is optional; the platform omits fields that do not apply
/// (for example `digital_delivery_info` on physical goods).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Order the item belongs to.
    #[serde(default, deserialize_with = "crate::clients::scalar_string")]
    pub order_id: Option<String>,
    /// Buyer identifier.
    #[serde(default, deserialize_with = "crate::clients::scalar_string")]
    pub buyer_id: Option<String>,
    /// Seller SKU.
    #[serde(default, deserialize_with = "crate::clients::scalar_string")]
    pub sku: Option<String>,
    /// Platform SKU.
    #[serde(default, deserialize_with = "crate::clients::scalar_string")]
    pub shop_sku: Option<String>,
    /// Product name.
    #[serde(default, deserialize_with = "crate::clients::scalar_string")]
    pub name: Option<String>,
    /// Item status (`pending`, `shipped`, ...).
    #[serde(default, deserialize_with = "crate::clients::scalar_string")]
    pub status: Option<String>,
    /// Delivery details for digital goods.
    #[serde(default, deserialize_with = "crate::clients::scalar_string")]
    pub digital_delivery_info: Option<String>,
}

/// An order whose items could not be fetched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedOrder {
    /// The order that was skipped.
    pub order_id: String,
    /// The platform status code.
    pub code: Option<String>,
    /// The platform status message.
    pub message: Option<String>,
}

/// Outcome of [`sync_orders`](crate::orders::sync_orders).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Always `"success"` for a completed run.
    pub status: String,
    /// Every item recorded, in order.
    pub items: Vec<OrderItem>,
    /// Orders skipped because their item call was rejected.
    pub skipped: Vec<SkippedOrder>,
}

impl SyncReport {
    pub(crate) fn new() -> Self {
        Self {
            status: "success".to_string(),
            items: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

fn required_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    crate::clients::scalar_string(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("expected a non-null scalar"))
}
