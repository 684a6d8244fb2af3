//! Provider registry and the settings-erased provider object.
//!
//! The host discovers providers through an explicit registry populated at
//! startup. Stored settings arrive as JSON values; [`DynPaymentProvider`]
//! deserializes them into each provider's typed settings per call, so the
//! host never needs to know a provider's concrete settings type.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::error::ProviderError;
use crate::objects::{
    CallbackRequest, CallbackResult, OrderReference, PaymentFormResult, PaymentOrder, PaymentUrls,
};
use crate::provider::PaymentProvider;

/// Display metadata for a registered provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDescriptor {
    /// Stable identifier used in callback URLs and store configuration.
    pub alias: &'static str,
    /// Human-facing name shown in the back office.
    pub label: &'static str,
    pub description: &'static str,
    /// Back-office icon name.
    pub icon: &'static str,
}

/// Object-safe form of [`PaymentProvider`] with settings erased to JSON.
///
/// A failure to deserialize the stored settings maps to each operation's
/// rejection value: `None` for order-reference recovery,
/// [`CallbackResult::BadRequest`] for callbacks, and
/// [`ProviderError::Settings`] for the `Result`-returning operations.
#[async_trait]
pub trait DynPaymentProvider: Send + Sync {
    fn finalize_at_continue_url(&self) -> bool;

    async fn get_order_reference(
        &self,
        request: &CallbackRequest,
        settings: &Value,
    ) -> Option<OrderReference>;

    async fn generate_checkout_form(
        &self,
        order: &PaymentOrder,
        urls: &PaymentUrls,
        settings: &Value,
    ) -> Result<PaymentFormResult, ProviderError>;

    fn continue_url(&self, order: &PaymentOrder, settings: &Value)
        -> Result<String, ProviderError>;

    fn cancel_url(&self, order: &PaymentOrder, settings: &Value)
        -> Result<String, ProviderError>;

    fn error_url(&self, order: &PaymentOrder, settings: &Value)
        -> Result<String, ProviderError>;

    async fn process_callback(
        &self,
        order: &PaymentOrder,
        request: &CallbackRequest,
        settings: &Value,
    ) -> CallbackResult;
}

/// Adapter lifting a typed [`PaymentProvider`] into the erased contract.
struct Erased<P> {
    alias: &'static str,
    provider: P,
}

impl<P: PaymentProvider> Erased<P> {
    fn settings(&self, value: &Value) -> Result<P::Settings, ProviderError> {
        serde_json::from_value(value.clone()).map_err(ProviderError::Settings)
    }
}

#[async_trait]
impl<P: PaymentProvider> DynPaymentProvider for Erased<P> {
    fn finalize_at_continue_url(&self) -> bool {
        self.provider.finalize_at_continue_url()
    }

    async fn get_order_reference(
        &self,
        request: &CallbackRequest,
        settings: &Value,
    ) -> Option<OrderReference> {
        match self.settings(settings) {
            Ok(settings) => self.provider.get_order_reference(request, &settings).await,
            Err(e) => {
                warn!(
                    provider = self.alias,
                    error = %e,
                    "stored settings rejected, falling back to default order resolution"
                );
                None
            }
        }
    }

    async fn generate_checkout_form(
        &self,
        order: &PaymentOrder,
        urls: &PaymentUrls,
        settings: &Value,
    ) -> Result<PaymentFormResult, ProviderError> {
        let settings = self.settings(settings)?;
        self.provider
            .generate_checkout_form(order, urls, &settings)
            .await
    }

    fn continue_url(
        &self,
        order: &PaymentOrder,
        settings: &Value,
    ) -> Result<String, ProviderError> {
        let settings = self.settings(settings)?;
        self.provider.continue_url(order, &settings)
    }

    fn cancel_url(
        &self,
        order: &PaymentOrder,
        settings: &Value,
    ) -> Result<String, ProviderError> {
        let settings = self.settings(settings)?;
        self.provider.cancel_url(order, &settings)
    }

    fn error_url(
        &self,
        order: &PaymentOrder,
        settings: &Value,
    ) -> Result<String, ProviderError> {
        let settings = self.settings(settings)?;
        self.provider.error_url(order, &settings)
    }

    async fn process_callback(
        &self,
        order: &PaymentOrder,
        request: &CallbackRequest,
        settings: &Value,
    ) -> CallbackResult {
        match self.settings(settings) {
            Ok(settings) => {
                self.provider
                    .process_callback(order, request, &settings)
                    .await
            }
            Err(e) => {
                warn!(
                    provider = self.alias,
                    error = %e,
                    "stored settings rejected, refusing callback"
                );
                CallbackResult::bad_request()
            }
        }
    }
}

type ProviderFactory = Arc<dyn Fn() -> Arc<dyn DynPaymentProvider> + Send + Sync>;

struct RegistryEntry {
    descriptor: ProviderDescriptor,
    factory: ProviderFactory,
}

/// Registry of payment providers keyed by alias.
#[derive(Default)]
pub struct ProviderRegistry {
    entries: HashMap<&'static str, RegistryEntry>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under its descriptor's alias.
    ///
    /// Re-registering an alias replaces the previous entry.
    pub fn register<P, F>(&mut self, descriptor: ProviderDescriptor, factory: F)
    where
        P: PaymentProvider + 'static,
        F: Fn() -> P + Send + Sync + 'static,
    {
        let alias = descriptor.alias;
        let factory: ProviderFactory = Arc::new(move || -> Arc<dyn DynPaymentProvider> {
            Arc::new(Erased {
                alias,
                provider: factory(),
            })
        });
        self.entries.insert(alias, RegistryEntry { descriptor, factory });
    }

    /// Instantiate the provider registered under `alias`.
    pub fn create(&self, alias: &str) -> Option<Arc<dyn DynPaymentProvider>> {
        self.entries.get(alias).map(|entry| (entry.factory)())
    }

    /// Descriptor of the provider registered under `alias`.
    pub fn descriptor(&self, alias: &str) -> Option<&ProviderDescriptor> {
        self.entries.get(alias).map(|entry| &entry.descriptor)
    }

    /// All registered descriptors, in no particular order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.entries.values().map(|entry| &entry.descriptor)
    }
}
