//! Callback processing results returned to the host.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment status the host records against an order after a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// The gateway has not reported a final state yet.
    PendingExternalSystem,
    /// The payment is authorized (or already captured) on the gateway side.
    Authorized,
    /// The payment was cancelled on the gateway side.
    Cancelled,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::PendingExternalSystem => write!(f, "pending_external_system"),
            PaymentStatus::Authorized => write!(f, "authorized"),
            PaymentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Transaction details the host records against the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInfo {
    /// Gateway-side transaction identifier.
    pub transaction_id: String,
    pub amount_authorized: Decimal,
    pub transaction_fee: Decimal,
    pub payment_status: PaymentStatus,
}

/// Outcome of `process_callback`.
///
/// Providers never surface an error type to the host here: a callback that
/// cannot be authenticated or understood maps to [`CallbackResult::BadRequest`],
/// which the host answers with HTTP 400.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackResult {
    /// The callback was authenticated and reconciled against the gateway.
    Processed(TransactionInfo),
    /// The callback could not be authenticated or understood.
    BadRequest,
}

impl CallbackResult {
    pub fn success(info: TransactionInfo) -> Self {
        Self::Processed(info)
    }

    pub fn bad_request() -> Self {
        Self::BadRequest
    }

    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::BadRequest)
    }

    /// The recorded transaction, unless the callback was rejected.
    pub fn transaction(&self) -> Option<&TransactionInfo> {
        match self {
            Self::Processed(info) => Some(info),
            Self::BadRequest => None,
        }
    }
}
