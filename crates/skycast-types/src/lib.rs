//! Shared data types for the skycast weather service.
//!
//! This crate defines the canonical weather snapshot returned to API
//! callers ([`WeatherRecord`]) and the slimmer record persisted into the
//! lookup history ([`LookupRecord`]), so the provider client, the store,
//! and the HTTP layer all agree on one shape.

mod types;

pub use types::{LookupRecord, WeatherRecord, round_tenths};
