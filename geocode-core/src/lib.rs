//! Core library for the `geocode` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over geocoding providers, with a HERE Geocoder API client
//! - Shared domain models (locations, addresses) and the error taxonomy
//!
//! It is used by `geocode-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use config::{Config, ProviderConfig};
pub use error::GeocodeError;
pub use model::{Location, StructuredAddress};
pub use provider::{Geocoder, ProviderId, here::HereGeocoder};
