//! Data models for stored lookups.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A history entry stored in the database.
///
/// The id and timestamp are assigned by the store at insertion; nothing
/// updates an entry afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredLookup {
    /// Database row ID.
    pub id: i64,
    /// City name as reported by the provider.
    pub city_name: String,
    /// Two-letter country code.
    pub country: Option<String>,
    /// Temperature in Celsius at lookup time.
    pub temperature: Option<f64>,
    /// Condition description at lookup time.
    pub weather_description: Option<String>,
    /// Relative humidity percentage at lookup time.
    pub humidity: Option<u8>,
    /// Wind speed in m/s at lookup time.
    pub wind_speed: Option<f64>,
    /// When the lookup was recorded (UTC).
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}
