//! OpenWeatherMap client for the skycast weather service.
//!
//! This crate is the gateway between skycast and the external weather
//! provider. It issues a single bounded request per lookup, classifies
//! every failure into the error taxonomy in [`Error`], and normalizes a
//! successful payload into the canonical
//! [`WeatherRecord`](skycast_types::WeatherRecord).
//!
//! # Example
//!
//! ```no_run
//! use skycast_provider::{OpenWeatherClient, ProviderConfig};
//!
//! # async fn run() -> skycast_provider::Result<()> {
//! let client = OpenWeatherClient::new(ProviderConfig::new("api-key"))?;
//! let record = client.fetch_current("London").await?;
//! println!("{} {:.1}C", record.city, record.temperature);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod payload;

pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, OpenWeatherClient, ProviderConfig};
pub use error::{Error, Result};
pub use payload::CurrentWeatherPayload;
