//! Checkout form descriptors returned by form generation.

use serde::{Deserialize, Serialize};

/// URLs the host computes for one checkout session.
#[derive(Debug, Clone, Default)]
pub struct PaymentUrls {
    /// Where the shopper lands after completing the gateway checkout.
    pub continue_url: String,
    /// Where the shopper lands after abandoning the gateway checkout.
    pub cancel_url: String,
    /// The host endpoint the gateway calls back asynchronously.
    pub callback_url: String,
}

/// HTTP method of the generated checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FormMethod {
    Get,
    Post,
}

impl std::fmt::Display for FormMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormMethod::Get => write!(f, "GET"),
            FormMethod::Post => write!(f, "POST"),
        }
    }
}

/// A checkout form the host renders for the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentForm {
    /// Form action: the URL the shopper is sent to.
    pub action: String,
    pub method: FormMethod,
}

impl PaymentForm {
    /// A GET form, i.e. a plain redirect to `action`.
    pub fn redirect(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            method: FormMethod::Get,
        }
    }

    /// A POST form submitting to `action`.
    pub fn post(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            method: FormMethod::Post,
        }
    }
}

/// Result of checkout form generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentFormResult {
    pub form: PaymentForm,
}

impl From<PaymentForm> for PaymentFormResult {
    fn from(form: PaymentForm) -> Self {
        Self { form }
    }
}
