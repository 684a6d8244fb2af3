//! Error taxonomy shared by all payment providers.

use thiserror::Error;

/// Errors surfaced to the host by the fallible provider operations
/// (checkout form generation and redirect URL resolution).
///
/// Callback processing never returns this type: inbound callbacks that
/// cannot be processed map to
/// [`CallbackResult::BadRequest`](crate::objects::CallbackResult::BadRequest)
/// instead.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A required provider setting is missing or empty.
    #[error("missing required setting: {0}")]
    MissingSetting(&'static str),

    /// Stored provider settings could not be deserialized.
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// The order carries a currency code ISO 4217 does not recognize.
    #[error("currency not supported: {0}")]
    UnsupportedCurrency(String),

    /// The order amount cannot be represented in the gateway's minor units.
    #[error("amount cannot be represented in minor units")]
    AmountOverflow,

    /// The gateway accepted the request but returned no checkout page URL.
    #[error("gateway response carried no checkout page url")]
    MissingCheckoutUrl,

    /// A gateway call failed.
    #[error("gateway error: {0}")]
    Gateway(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ProviderError {
    /// Wrap a gateway-specific error.
    pub fn gateway(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Gateway(Box::new(err))
    }
}
