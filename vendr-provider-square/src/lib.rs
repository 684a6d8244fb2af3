//! Square hosted-checkout payment provider.
//!
//! Integrates the host checkout pipeline with Square: checkout forms are
//! generated through Square's Checkout API, and payment webhooks are
//! authenticated ([`signature`]) and reconciled against the Orders API
//! ([`provider::SquareCheckoutProvider`]).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod api;
pub mod client;
pub mod provider;
pub mod settings;
pub mod signature;
pub mod webhook;

pub use provider::SquareCheckoutProvider;
pub use settings::{SquareEnvironment, SquareSettings};
