//! Host-facing contract for payment-provider plugins.
//!
//! The checkout host drives every provider through the same four seams:
//! order-reference recovery, checkout form generation, redirect URL
//! resolution, and callback processing. This crate defines those seams
//! ([`provider::PaymentProvider`]), the object model that crosses them
//! ([`objects`]), and the registry the host uses to discover providers by
//! alias ([`registry::ProviderRegistry`]).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod currency;
pub mod error;
pub mod objects;
pub mod provider;
pub mod registry;
