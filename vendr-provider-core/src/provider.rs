//! The payment-provider contract.
//!
//! The host invokes one operation per inbound HTTP request or checkout
//! pipeline step. Implementations hold no state between invocations;
//! settings are materialized by the host per call and stay immutable for
//! its duration.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ProviderError;
use crate::objects::{
    CallbackRequest, CallbackResult, OrderReference, PaymentFormResult, PaymentOrder, PaymentUrls,
};

/// A payment-gateway integration.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Typed view of the provider's stored settings.
    type Settings: DeserializeOwned + Send + Sync;

    /// Whether the order is finalized when the shopper reaches the continue
    /// URL, rather than by an asynchronous gateway callback.
    fn finalize_at_continue_url(&self) -> bool {
        false
    }

    /// Recover the order reference from an inbound callback before the host
    /// has resolved an order.
    ///
    /// Returns `None` whenever the request cannot be tied to an order
    /// (unsigned requests, test events, out-of-band gateway orders), and
    /// the host then falls back to its default resolution strategy.
    async fn get_order_reference(
        &self,
        request: &CallbackRequest,
        settings: &Self::Settings,
    ) -> Option<OrderReference>;

    /// Generate the checkout form that sends the shopper to the gateway.
    async fn generate_checkout_form(
        &self,
        order: &PaymentOrder,
        urls: &PaymentUrls,
        settings: &Self::Settings,
    ) -> Result<PaymentFormResult, ProviderError>;

    /// Resolve the continue URL for an order.
    fn continue_url(
        &self,
        order: &PaymentOrder,
        settings: &Self::Settings,
    ) -> Result<String, ProviderError>;

    /// Resolve the cancel URL for an order.
    fn cancel_url(
        &self,
        order: &PaymentOrder,
        settings: &Self::Settings,
    ) -> Result<String, ProviderError>;

    /// Resolve the error URL for an order.
    fn error_url(
        &self,
        order: &PaymentOrder,
        settings: &Self::Settings,
    ) -> Result<String, ProviderError>;

    /// Authenticate an inbound gateway callback and reconcile it against an
    /// order the host already resolved.
    async fn process_callback(
        &self,
        order: &PaymentOrder,
        request: &CallbackRequest,
        settings: &Self::Settings,
    ) -> CallbackResult;
}

/// Host-side order lookup used by order-reference recovery.
#[async_trait]
pub trait OrderResolver: Send + Sync {
    /// Fetch the order snapshot for `order_id`, if the host knows it.
    async fn resolve(&self, order_id: Uuid) -> Option<PaymentOrder>;
}
