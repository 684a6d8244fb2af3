//! Minimal pass-through payment provider.
//!
//! The starting point for new gateway integrations: it contacts no
//! gateway, submits the shopper straight to the continue URL, authorizes
//! every callback for the order total, and finalizes at the continue URL.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use vendr_provider_core::error::ProviderError;
use vendr_provider_core::objects::{
    CallbackRequest, CallbackResult, OrderReference, PaymentForm, PaymentFormResult, PaymentOrder,
    PaymentStatus, PaymentUrls, TransactionInfo,
};
use vendr_provider_core::provider::PaymentProvider;
use vendr_provider_core::registry::ProviderDescriptor;

/// Stored settings for the template provider.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Where the shopper lands after checkout. Required.
    pub continue_url: String,
}

/// Pass-through provider that authorizes every callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplatePaymentProvider;

impl TemplatePaymentProvider {
    /// Descriptor under which the host registers this provider.
    pub fn descriptor() -> ProviderDescriptor {
        ProviderDescriptor {
            alias: "template",
            label: "Template",
            description: "Template payment provider",
            icon: "icon-invoice",
        }
    }
}

#[async_trait]
impl PaymentProvider for TemplatePaymentProvider {
    type Settings = TemplateSettings;

    fn finalize_at_continue_url(&self) -> bool {
        true
    }

    async fn get_order_reference(
        &self,
        _request: &CallbackRequest,
        _settings: &Self::Settings,
    ) -> Option<OrderReference> {
        None
    }

    async fn generate_checkout_form(
        &self,
        _order: &PaymentOrder,
        urls: &PaymentUrls,
        _settings: &Self::Settings,
    ) -> Result<PaymentFormResult, ProviderError> {
        Ok(PaymentForm::post(urls.continue_url.clone()).into())
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
        _request: &CallbackRequest,
        _settings: &Self::Settings,
    ) -> CallbackResult {
        CallbackResult::success(TransactionInfo {
            transaction_id: Uuid::new_v4().simple().to_string(),
            amount_authorized: order.total_price.with_tax(),
            transaction_fee: Decimal::ZERO,
            payment_status: PaymentStatus::Authorized,
        })
    }
}
