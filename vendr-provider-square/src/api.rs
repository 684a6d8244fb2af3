//! Wire types for the Square REST endpoints this provider calls.
//!
//! Only the fields the provider reads or writes are modeled; Square's
//! responses carry more, and serde ignores the rest.

use serde::{Deserialize, Serialize};

/// An amount of money in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: i64,
    /// ISO 4217 alpha code.
    pub currency: String,
}

/// One line of a Square order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub quantity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price_money: Option<Money>,
}

/// Originator tag attached to orders created by this integration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSource {
    pub name: String,
}

/// A Square order, as sent to and returned by the Orders API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SquareOrder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    /// Caller-supplied correlation id; this provider stores the host order
    /// id here and reads it back during order-reference recovery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Lifecycle state: `OPEN`, `COMPLETED`, `CANCELED`, …
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<OrderSource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<OrderLineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_money: Option<Money>,
}

/// Request body for `POST /v2/orders/batch-retrieve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRetrieveOrdersRequest {
    pub order_ids: Vec<String>,
}

/// Response body for `POST /v2/orders/batch-retrieve`.
///
/// Unknown ids are simply absent from `orders`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BatchRetrieveOrdersResponse {
    pub orders: Vec<SquareOrder>,
}

/// Order-creation request embedded in a checkout request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    /// Fresh UUID per attempt; Square deduplicates retried creations on it.
    pub idempotency_key: String,
    pub order: SquareOrder,
}

/// Request body for `POST /v2/locations/{location_id}/checkouts`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCheckoutRequest {
    /// Fresh UUID per attempt, independent of the embedded order's key.
    pub idempotency_key: String,
    pub order: CreateOrderRequest,
    /// Where Square sends the shopper after payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

/// A hosted checkout created by Square.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Checkout {
    pub id: Option<String>,
    /// The page the shopper is redirected to.
    pub checkout_page_url: Option<String>,
}

/// Response body for `POST /v2/locations/{location_id}/checkouts`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateCheckoutResponse {
    pub checkout: Option<Checkout>,
}

/// One error in Square's error envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SquareApiError {
    pub category: Option<String>,
    pub code: Option<String>,
    pub detail: Option<String>,
    pub field: Option<String>,
}

/// Square's error envelope, returned with non-2xx statuses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SquareErrorBody {
    pub errors: Vec<SquareApiError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_checkout_request_omits_absent_fields() {
        let request = CreateCheckoutRequest {
            idempotency_key: "key-1".to_string(),
            order: CreateOrderRequest {
                idempotency_key: "key-2".to_string(),
                order: SquareOrder {
                    location_id: Some("L123".to_string()),
                    reference_id: Some("ref-1".to_string()),
                    line_items: vec![OrderLineItem {
                        uid: Some("uid-1".to_string()),
                        quantity: "1".to_string(),
                        name: Some("ORDER-42".to_string()),
                        base_price_money: Some(Money {
                            amount: 1999,
                            currency: "USD".to_string(),
                        }),
                    }],
                    ..SquareOrder::default()
                },
            },
            redirect_url: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("redirect_url").is_none());
        let order = &json["order"]["order"];
        assert!(order.get("customer_id").is_none());
        assert!(order.get("state").is_none());
        assert_eq!(order["line_items"][0]["base_price_money"]["amount"], 1999);
    }

    #[test]
    fn test_batch_retrieve_response_defaults_to_empty() {
        let response: BatchRetrieveOrdersResponse = serde_json::from_str("{}").unwrap();
        assert!(response.orders.is_empty());
    }

    #[test]
    fn test_error_envelope_parses() {
        let body = br#"{
            "errors": [{
                "category": "INVALID_REQUEST_ERROR",
                "code": "NOT_FOUND",
                "detail": "Order not found."
            }]
        }"#;
        let envelope: SquareErrorBody = serde_json::from_slice(body).unwrap();
        assert_eq!(envelope.errors[0].detail.as_deref(), Some("Order not found."));
    }
}
