//! Inbound webhook event model.
//!
//! Square webhook payloads are sparse: test events omit most of the payment
//! object, and real events only carry the fields relevant to the event
//! type. Every field is therefore optional; each operation decides what it
//! needs and treats the rest as absent.
//!
//! Events are parsed once per inbound request and discarded after
//! processing; nothing here is persisted.

use serde::Deserialize;
use time::OffsetDateTime;

use crate::api::Money;

/// A Square webhook event envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct SquareWebhookEvent {
    pub merchant_id: Option<String>,
    /// Event kind, e.g. `payment.updated`.
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub event_id: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    pub data: Option<WebhookData>,
}

impl SquareWebhookEvent {
    /// Parse an event from the raw request body.
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// The payment object, when the event carries one.
    pub fn payment(&self) -> Option<&WebhookPayment> {
        self.data.as_ref()?.object.as_ref()?.payment.as_ref()
    }

    /// The payment's associated Square order id, when the event carries one.
    pub fn payment_order_id(&self) -> Option<&str> {
        self.payment().and_then(|payment| payment.order_id.as_deref())
    }
}

/// The `data` member of a webhook envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookData {
    #[serde(rename = "type")]
    pub object_type: Option<String>,
    pub id: Option<String>,
    pub object: Option<WebhookObject>,
}

/// The `data.object` member of a webhook envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookObject {
    pub payment: Option<WebhookPayment>,
}

/// The payment carried by `payment.*` events.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayment {
    pub id: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
    pub amount_money: Option<Money>,
    pub total_money: Option<Money>,
    /// Payment lifecycle status, e.g. `APPROVED`, `COMPLETED`.
    pub status: Option<String>,
    pub source_type: Option<String>,
    /// Card details vary by brand and entry method; kept opaque.
    pub card_details: Option<serde_json::Value>,
    /// The Square order this payment pays for.
    pub order_id: Option<String>,
    pub reference_id: Option<String>,
    pub customer_id: Option<String>,
    pub version: Option<i64>,
}
