//! The Square hosted-checkout payment provider.
//!
//! Checkout forms redirect the shopper to a Square-hosted payment page;
//! the order is finalized later by a signed `payment.*` webhook, which the
//! provider authenticates and reconciles against Square's Orders API.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, error, warn};
use uuid::Uuid;

use vendr_provider_core::currency;
use vendr_provider_core::error::ProviderError;
use vendr_provider_core::objects::{
    CallbackRequest, CallbackResult, OrderReference, PaymentForm, PaymentFormResult, PaymentOrder,
    PaymentStatus, PaymentUrls, TransactionInfo,
};
use vendr_provider_core::provider::{OrderResolver, PaymentProvider};
use vendr_provider_core::registry::ProviderDescriptor;

use crate::api::{
    BatchRetrieveOrdersRequest, CreateCheckoutRequest, CreateOrderRequest, Money, OrderLineItem,
    OrderSource, SquareOrder,
};
use crate::client::{GatewayError, SquareApiClient, SquareGateway};
use crate::settings::SquareSettings;
use crate::signature::{SIGNATURE_HEADER, verify_signature};
use crate::webhook::SquareWebhookEvent;

/// Name Square displays as the order source.
const ORDER_SOURCE_NAME: &str = "Vendr";

type GatewayFactory =
    dyn Fn(&SquareSettings) -> Result<Arc<dyn SquareGateway>, GatewayError> + Send + Sync;

/// Map a Square order state onto a payment status.
///
/// Matching is case-insensitive; unknown and absent states map to
/// [`PaymentStatus::PendingExternalSystem`].
pub fn map_order_state(state: &str) -> PaymentStatus {
    match state.to_ascii_uppercase().as_str() {
        "COMPLETED" | "AUTHORIZED" => PaymentStatus::Authorized,
        "CANCELED" => PaymentStatus::Cancelled,
        _ => PaymentStatus::PendingExternalSystem,
    }
}

/// Resolve the payment status of a Square order by id.
pub async fn resolve_status(
    gateway: &dyn SquareGateway,
    order_id: &str,
) -> Result<PaymentStatus, GatewayError> {
    let order = fetch_order(gateway, order_id).await?;
    let state = order.and_then(|order| order.state).unwrap_or_default();
    Ok(map_order_state(&state))
}

/// Fetch a Square order by id. `Ok(None)` when the gateway knows no such
/// order.
async fn fetch_order(
    gateway: &dyn SquareGateway,
    order_id: &str,
) -> Result<Option<SquareOrder>, GatewayError> {
    let request = BatchRetrieveOrdersRequest {
        order_ids: vec![order_id.to_string()],
    };
    let response = gateway.batch_retrieve_orders(request).await?;
    Ok(response.orders.into_iter().next())
}

/// Convert a decimal major-unit amount to integer minor units (×100,
/// banker's rounding).
fn to_minor_units(amount: Decimal) -> Result<i64, ProviderError> {
    (amount * Decimal::ONE_HUNDRED)
        .round_dp(0)
        .to_i64()
        .ok_or(ProviderError::AmountOverflow)
}

/// Square hosted-checkout payment provider.
pub struct SquareCheckoutProvider {
    orders: Arc<dyn OrderResolver>,
    gateway_factory: Arc<GatewayFactory>,
}

impl SquareCheckoutProvider {
    /// Descriptor under which the host registers this provider.
    pub fn descriptor() -> ProviderDescriptor {
        ProviderDescriptor {
            alias: "square-checkout-onetime",
            label: "Square Checkout (One Time)",
            description: "Square payment provider for one time payments",
            icon: "icon-invoice",
        }
    }

    /// Provider backed by the real Square REST client.
    pub fn new(orders: Arc<dyn OrderResolver>) -> Self {
        Self::with_gateway_factory(orders, |settings| {
            let client = SquareApiClient::for_settings(settings)?;
            Ok(Arc::new(client))
        })
    }

    /// Provider with a custom gateway constructor. Tests use this to inject
    /// stub gateways.
    pub fn with_gateway_factory<F>(orders: Arc<dyn OrderResolver>, factory: F) -> Self
    where
        F: Fn(&SquareSettings) -> Result<Arc<dyn SquareGateway>, GatewayError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            orders,
            gateway_factory: Arc::new(factory),
        }
    }

    fn gateway(&self, settings: &SquareSettings) -> Result<Arc<dyn SquareGateway>, GatewayError> {
        (self.gateway_factory)(settings)
    }

    fn verify_request(&self, request: &CallbackRequest, settings: &SquareSettings) -> bool {
        let claimed = request.header(SIGNATURE_HEADER).unwrap_or_default();
        verify_signature(
            settings.webhook_signing_secret(),
            request.url(),
            request.body(),
            claimed,
        )
    }
}

#[async_trait]
impl PaymentProvider for SquareCheckoutProvider {
    type Settings = SquareSettings;

    async fn get_order_reference(
        &self,
        request: &CallbackRequest,
        settings: &Self::Settings,
    ) -> Option<OrderReference> {
        if !self.verify_request(request, settings) {
            warn!("webhook signature rejected, skipping order reference recovery");
            return None;
        }

        let event = match SquareWebhookEvent::parse(request.body()) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "unparseable webhook payload");
                return None;
            }
        };
        let Some(square_order_id) = event.payment_order_id() else {
            debug!("webhook carries no payment order id");
            return None;
        };

        let gateway = match self.gateway(settings) {
            Ok(gateway) => gateway,
            Err(e) => {
                error!(error = %e, "gateway client construction failed");
                return None;
            }
        };
        let square_order = match fetch_order(gateway.as_ref(), square_order_id).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                debug!(square_order_id, "square order not found");
                return None;
            }
            Err(e) => {
                error!(error = %e, square_order_id, "square order lookup failed");
                return None;
            }
        };

        let Some(reference_id) = square_order.reference_id else {
            debug!(square_order_id, "square order carries no reference id");
            return None;
        };
        let Ok(host_order_id) = Uuid::parse_str(&reference_id) else {
            debug!(%reference_id, "reference id is not a host order id");
            return None;
        };

        let order = self.orders.resolve(host_order_id).await?;
        Some(order.generate_order_reference())
    }

    async fn generate_checkout_form(
        &self,
        order: &PaymentOrder,
        urls: &PaymentUrls,
        settings: &Self::Settings,
    ) -> Result<PaymentFormResult, ProviderError> {
        let currency_code = order.currency_code.to_ascii_uppercase();
        if !currency::is_recognized(&currency_code) {
            return Err(ProviderError::UnsupportedCurrency(currency_code));
        }

        // Square prices the single line item tax-exclusive; tax handling
        // stays on the Square side.
        let amount = to_minor_units(order.total_price.without_tax)?;

        let square_order = SquareOrder {
            location_id: Some(settings.location_id.clone()),
            reference_id: Some(order.id.to_string()),
            customer_id: order.customer_reference.clone(),
            source: Some(OrderSource {
                name: ORDER_SOURCE_NAME.to_string(),
            }),
            line_items: vec![OrderLineItem {
                uid: Some(order.id.to_string()),
                quantity: "1".to_string(),
                name: Some(order.order_number.clone()),
                base_price_money: Some(Money {
                    amount,
                    currency: currency_code,
                }),
            }],
            ..SquareOrder::default()
        };

        let request = CreateCheckoutRequest {
            idempotency_key: Uuid::new_v4().to_string(),
            order: CreateOrderRequest {
                idempotency_key: Uuid::new_v4().to_string(),
                order: square_order,
            },
            redirect_url: Some(urls.continue_url.clone()),
        };

        let gateway = self.gateway(settings).map_err(ProviderError::gateway)?;
        let response = gateway
            .create_checkout(&settings.location_id, request)
            .await
            .map_err(ProviderError::gateway)?;

        let checkout_url = response
            .checkout
            .and_then(|checkout| checkout.checkout_page_url)
            .ok_or(ProviderError::MissingCheckoutUrl)?;

        Ok(PaymentForm::redirect(checkout_url).into())
    }

    fn continue_url(
        &self,
        _order: &PaymentOrder,
        settings: &Self::Settings,
    ) -> Result<String, ProviderError> {
        if settings.continue_url.is_empty() {
            return Err(ProviderError::MissingSetting("continue_url"));
        }
        Ok(settings.continue_url.clone())
    }

    fn cancel_url(
        &self,
        _order: &PaymentOrder,
        _settings: &Self::Settings,
    ) -> Result<String, ProviderError> {
        Ok(String::new())
    }

    fn error_url(
        &self,
        _order: &PaymentOrder,
        _settings: &Self::Settings,
    ) -> Result<String, ProviderError> {
        Ok(String::new())
    }

    async fn process_callback(
        &self,
        order: &PaymentOrder,
        request: &CallbackRequest,
        settings: &Self::Settings,
    ) -> CallbackResult {
        if !self.verify_request(request, settings) {
            warn!(order_id = %order.id, "webhook signature rejected");
            return CallbackResult::bad_request();
        }

        let event = match SquareWebhookEvent::parse(request.body()) {
            Ok(event) => event,
            Err(e) => {
                warn!(order_id = %order.id, error = %e, "unparseable webhook payload");
                return CallbackResult::bad_request();
            }
        };
        let Some(square_order_id) = event.payment_order_id() else {
            warn!(order_id = %order.id, "webhook carries no payment order id");
            return CallbackResult::bad_request();
        };

        let gateway = match self.gateway(settings) {
            Ok(gateway) => gateway,
            Err(e) => {
                error!(order_id = %order.id, error = %e, "gateway client construction failed");
                return CallbackResult::bad_request();
            }
        };
        let square_order = match fetch_order(gateway.as_ref(), square_order_id).await {
            Ok(found) => found,
            Err(e) => {
                error!(order_id = %order.id, error = %e, "square order lookup failed");
                return CallbackResult::bad_request();
            }
        };

        // An order missing from the response stays pending; the webhook is
        // redelivered once Square settles it.
        let (transaction_id, state) = match square_order {
            Some(square_order) => (
                square_order
                    .id
                    .unwrap_or_else(|| square_order_id.to_string()),
                square_order.state.unwrap_or_default(),
            ),
            None => (square_order_id.to_string(), String::new()),
        };

        CallbackResult::success(TransactionInfo {
            transaction_id,
            amount_authorized: order.total_price.with_tax(),
            transaction_fee: Decimal::ZERO,
            payment_status: map_order_state(&state),
        })
    }
}
