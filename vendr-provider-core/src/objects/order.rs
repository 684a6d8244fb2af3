//! Order snapshot types handed from the host to providers.

use rust_decimal::Decimal;
use uuid::Uuid;

/// Order totals with the tax split out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TotalPrice {
    pub without_tax: Decimal,
    pub tax: Decimal,
}

impl TotalPrice {
    pub fn new(without_tax: Decimal, tax: Decimal) -> Self {
        Self { without_tax, tax }
    }

    /// Tax-inclusive total.
    pub fn with_tax(&self) -> Decimal {
        self.without_tax + self.tax
    }
}

/// Read-only snapshot of a host order as handed to payment providers.
///
/// Providers never mutate orders; all order state transitions happen in the
/// host pipeline after a provider returns.
#[derive(Debug, Clone)]
pub struct PaymentOrder {
    /// Host order id.
    pub id: Uuid,
    /// Human-facing order number.
    pub order_number: String,
    /// ISO 4217 alpha code of the order currency.
    pub currency_code: String,
    pub total_price: TotalPrice,
    /// Gateway-side customer identifier, when the store tracked one.
    pub customer_reference: Option<String>,
}

impl PaymentOrder {
    /// Build the reference the host uses to route callbacks to this order.
    pub fn generate_order_reference(&self) -> OrderReference {
        OrderReference {
            order_id: self.id,
            order_number: self.order_number.clone(),
        }
    }
}

/// Routing reference for a host order, formatted as
/// `"{order_id},{order_number}"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReference {
    pub order_id: Uuid,
    pub order_number: String,
}

impl std::fmt::Display for OrderReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.order_id, self.order_number)
    }
}

impl std::str::FromStr for OrderReference {
    type Err = ParseOrderReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, number) = s
            .split_once(',')
            .ok_or(ParseOrderReferenceError::MissingSeparator)?;
        let order_id =
            Uuid::parse_str(id).map_err(|_| ParseOrderReferenceError::InvalidOrderId)?;
        if number.is_empty() {
            return Err(ParseOrderReferenceError::EmptyOrderNumber);
        }
        Ok(Self {
            order_id,
            order_number: number.to_string(),
        })
    }
}

/// Errors produced when parsing an [`OrderReference`] from its string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseOrderReferenceError {
    #[error("missing `,` separator")]
    MissingSeparator,
    #[error("invalid order id")]
    InvalidOrderId,
    #[error("empty order number")]
    EmptyOrderNumber,
}
