//! Order listing and item sync.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde_json::Value;

use crate::clients::{ApiClient, ApiRequest, ApiResponse};
use crate::orders::{OrderItem, OrderSummary, SkippedOrder, SyncError, SyncReport};

/// Endpoint listing orders.
pub const ORDERS_PATH: &str = "/orders/get";
/// Endpoint listing the items of one order.
pub const ORDER_ITEMS_PATH: &str = "/order/items/get";

/// Formats a cutoff the way `/orders/get` expects it,
/// e.g. `2021-01-01T00:00:00+06:00`.
#[must_use]
pub fn format_created_after(created_after: &DateTime<FixedOffset>) -> String {
    created_after.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Lists the orders created after `created_after`.
///
/// # Errors
///
/// - [`SyncError::Transport`] if the call fails at the transport level
/// - [`SyncError::Api`] if the platform rejects the call
/// - [`SyncError::Malformed`] if the response has no `data.orders` array
pub async fn get_orders(
    client: &ApiClient,
    access_token: &str,
    created_after: &DateTime<FixedOffset>,
) -> Result<Vec<OrderSummary>, SyncError> {
    let request = ApiRequest::get(ORDERS_PATH)
        .param("created_after", format_created_after(created_after));
    let response = client.execute(&request, Some(access_token)).await?;

    if !response.is_success() {
        return Err(SyncError::Api {
            code: response.code.unwrap_or_default(),
            message: response.message.unwrap_or_default(),
        });
    }

    let orders = response
        .data()
        .and_then(|data| data.get("orders"))
        .filter(|orders| orders.is_array())
        .cloned()
        .ok_or_else(|| SyncError::Malformed {
            reason: "response has no data.orders array".to_string(),
        })?;

    serde_json::from_value(orders).map_err(|e| SyncError::Malformed {
        reason: format!("invalid order entry: {e}"),
    })
}

/// Fetches the items of one order.
///
/// API-level failures are returned inside the envelope.
///
/// # Errors
///
/// Returns [`SyncError::Transport`] if the call fails at the transport level.
pub async fn get_order_items(
    client: &ApiClient,
    access_token: &str,
    order_id: &str,
) -> Result<ApiResponse, SyncError> {
    let request = ApiRequest::get(ORDER_ITEMS_PATH).param("order_id", order_id);
    Ok(client.execute(&request, Some(access_token)).await?)
}

/// Lists the orders created after `created_after` and records every item.
///
/// Each item is emitted as one `INFO` event. An order whose item call is
/// rejected by the platform is logged at `WARN` and skipped; the run goes
/// on with the next order. A transport failure ends the run.
///
/// # Errors
///
/// - any error of [`get_orders`]
/// - [`SyncError::Transport`] if an item call fails at the transport level
/// - [`SyncError::Malformed`] if an item payload cannot be decoded
pub async fn sync_orders(
    client: &ApiClient,
    access_token: &str,
    created_after: &DateTime<FixedOffset>,
) -> Result<SyncReport, SyncError> {
    let orders = get_orders(client, access_token, created_after).await?;
    tracing::debug!(count = orders.len(), "Fetched Daraz orders");

    let mut report = SyncReport::new();
    for order in orders {
        let response = get_order_items(client, access_token, &order.order_id).await?;

        if !response.is_success() {
            tracing::warn!(
                order_id = %order.order_id,
                code = %response.code.as_deref().unwrap_or_default(),
                error_message = %response.message.as_deref().unwrap_or_default(),
                body = %response.body,
                "Skipping order whose items could not be fetched"
            );
            report.skipped.push(SkippedOrder {
                order_id: order.order_id,
                code: response.code,
                message: response.message,
            });
            continue;
        }

        for item in decode_items(&order.order_id, response.data())? {
            tracing::info!(
                order_id = item.order_id.as_deref().unwrap_or_default(),
                buyer_id = item.buyer_id.as_deref().unwrap_or_default(),
                sku = item.sku.as_deref().unwrap_or_default(),
                shop_sku = item.shop_sku.as_deref().unwrap_or_default(),
                name = item.name.as_deref().unwrap_or_default(),
                status = item.status.as_deref().unwrap_or_default(),
                digital_delivery_info = item.digital_delivery_info.as_deref().unwrap_or_default(),
                "Order item"
            );
            report.items.push(item);
        }
    }

    Ok(report)
}

fn decode_items(order_id: &str, data: Option<&Value>) -> Result<Vec<OrderItem>, SyncError> {
    match data {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(data) => {
            serde_json::from_value(data.clone()).map_err(|e| SyncError::Malformed {
                reason: format!("invalid items for order {order_id}: {e}"),
            })
        }
    }
}
