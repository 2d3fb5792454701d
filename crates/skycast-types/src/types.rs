//! Canonical weather data types.

use serde::{Deserialize, Serialize};

/// Normalized, caller-facing weather snapshot for one city at fetch time.
///
/// Every field is derived from a successful provider response; temperatures
/// are metric and rounded to one decimal place during normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// City name as reported by the provider.
    pub city: String,
    /// Two-letter country code.
    pub country: String,
    /// Temperature in Celsius.
    pub temperature: f64,
    /// Perceived temperature in Celsius.
    pub feels_like: f64,
    /// Minimum observed temperature in Celsius.
    pub temp_min: f64,
    /// Maximum observed temperature in Celsius.
    pub temp_max: f64,
    /// Relative humidity percentage.
    pub humidity: u8,
    /// Atmospheric pressure in hPa.
    pub pressure: u32,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    /// Wind direction in degrees; 0 when the provider omits it.
    pub wind_deg: i32,
    /// Short condition category (e.g. "Clouds").
    pub weather: String,
    /// Longer condition description (e.g. "broken clouds").
    pub weather_description: String,
    /// Provider icon code (e.g. "04d").
    pub weather_icon: String,
    /// Cloud cover percentage.
    pub clouds: u8,
    /// Visibility in kilometres; 0 when the provider omits it.
    pub visibility_km: f64,
    /// Local wall-clock sunrise, formatted HH:MM.
    pub sunrise: String,
    /// Local wall-clock sunset, formatted HH:MM.
    pub sunset: String,
    /// Offset of the city's timezone from UTC, in seconds.
    pub timezone_offset_seconds: i32,
    /// Latitude of the city.
    pub lat: f64,
    /// Longitude of the city.
    pub lon: f64,
}

/// The subset of a [`WeatherRecord`] persisted per successful lookup.
///
/// Only `city_name` is required; the store treats everything else as
/// optional so a history row never blocks on partial data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupRecord {
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
}

impl From<&WeatherRecord> for LookupRecord {
    fn from(record: &WeatherRecord) -> Self {
        Self {
            city_name: record.city.clone(),
            country: Some(record.country.clone()),
            temperature: Some(record.temperature),
            weather_description: Some(record.weather_description.clone()),
            humidity: Some(record.humidity),
            wind_speed: Some(record.wind_speed),
        }
    }
}

/// Round a value to one decimal place.
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> WeatherRecord {
        WeatherRecord {
            city: "London".to_string(),
            country: "GB".to_string(),
            temperature: 15.5,
            feels_like: 15.1,
            temp_min: 14.0,
            temp_max: 17.0,
            humidity: 72,
            pressure: 1012,
            wind_speed: 4.1,
            wind_deg: 80,
            weather: "Clouds".to_string(),
            weather_description: "broken clouds".to_string(),
            weather_icon: "04d".to_string(),
            clouds: 75,
            visibility_km: 10.0,
            sunrise: "07:29".to_string(),
            sunset: "16:56".to_string(),
            timezone_offset_seconds: 0,
            lat: 51.5085,
            lon: -0.1257,
        }
    }

    #[test]
    fn test_round_tenths() {
        assert_eq!(round_tenths(15.549), 15.5);
        assert_eq!(round_tenths(15.55), 15.6);
        assert_eq!(round_tenths(-3.14), -3.1);
        assert_eq!(round_tenths(0.0), 0.0);
        assert_eq!(round_tenths(20.0), 20.0);
    }

    #[test]
    fn test_lookup_record_from_weather_record() {
        let record = sample_record();
        let lookup = LookupRecord::from(&record);

        assert_eq!(lookup.city_name, "London");
        assert_eq!(lookup.country, Some("GB".to_string()));
        assert_eq!(lookup.temperature, Some(15.5));
        assert_eq!(
            lookup.weather_description,
            Some("broken clouds".to_string())
        );
        assert_eq!(lookup.humidity, Some(72));
        assert_eq!(lookup.wind_speed, Some(4.1));
    }

    #[test]
    fn test_weather_record_serialization() {
        let record = sample_record();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["city"], "London");
        assert_eq!(json["country"], "GB");
        assert_eq!(json["temperature"], 15.5);
        assert_eq!(json["humidity"], 72);
        assert_eq!(json["sunrise"], "07:29");
        assert_eq!(json["timezone_offset_seconds"], 0);
    }

    #[test]
    fn test_weather_record_round_trip() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: WeatherRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(back.city, record.city);
        assert_eq!(back.wind_deg, record.wind_deg);
        assert_eq!(back.visibility_km, record.visibility_km);
        assert_eq!(back.sunset, record.sunset);
    }
}
