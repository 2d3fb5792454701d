//! Raw provider payload shapes and normalization.

use serde::Deserialize;
use time::{OffsetDateTime, UtcOffset};

use skycast_types::{WeatherRecord, round_tenths};

use crate::error::{Error, Result};

/// The subset of the OpenWeatherMap current-weather payload that skycast
/// consumes.
///
/// Required fields are deliberately non-optional: a success response
/// missing any of them is a contract violation on the provider's side and
/// surfaces as [`Error::Contract`] rather than a partially filled record.
/// `wind.deg` and `visibility` are the only fields the provider documents
/// as omissible, so those default.
#[derive(Debug, Deserialize)]
pub struct CurrentWeatherPayload {
    pub name: String,
    pub coord: Coord,
    pub main: MainReadings,
    pub wind: Wind,
    pub clouds: Clouds,
    pub sys: Sys,
    pub weather: Vec<Condition>,
    /// Visibility in metres.
    #[serde(default)]
    pub visibility: f64,
    /// Offset from UTC in seconds.
    pub timezone: i32,
}

#[derive(Debug, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub pressure: u32,
}

#[derive(Debug, Deserialize)]
pub struct Wind {
    pub speed: f64,
    #[serde(default)]
    pub deg: i32,
}

#[derive(Debug, Deserialize)]
pub struct Clouds {
    pub all: u8,
}

#[derive(Debug, Deserialize)]
pub struct Sys {
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Normalize a raw provider payload into the canonical [`WeatherRecord`].
///
/// Temperatures are rounded to one decimal, visibility is converted from
/// metres to kilometres, and sunrise/sunset become local HH:MM strings
/// using the provider's reported timezone offset.
pub fn normalize(payload: CurrentWeatherPayload) -> Result<WeatherRecord> {
    let condition = payload
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| Error::Contract("weather array is empty".to_string()))?;

    Ok(WeatherRecord {
        city: payload.name,
        country: payload.sys.country,
        temperature: round_tenths(payload.main.temp),
        feels_like: round_tenths(payload.main.feels_like),
        temp_min: round_tenths(payload.main.temp_min),
        temp_max: round_tenths(payload.main.temp_max),
        humidity: payload.main.humidity,
        pressure: payload.main.pressure,
        wind_speed: payload.wind.speed,
        wind_deg: payload.wind.deg,
        weather: condition.main,
        weather_description: condition.description,
        weather_icon: condition.icon,
        clouds: payload.clouds.all,
        visibility_km: payload.visibility / 1000.0,
        sunrise: wall_clock(payload.sys.sunrise, payload.timezone)?,
        sunset: wall_clock(payload.sys.sunset, payload.timezone)?,
        timezone_offset_seconds: payload.timezone,
        lat: payload.coord.lat,
        lon: payload.coord.lon,
    })
}

/// Format an epoch timestamp as wall-clock HH:MM in the city's timezone.
fn wall_clock(epoch: i64, offset_seconds: i32) -> Result<String> {
    let offset = UtcOffset::from_whole_seconds(offset_seconds).map_err(|_| {
        Error::Contract(format!("timezone offset out of range: {offset_seconds}"))
    })?;
    let local = OffsetDateTime::from_unix_timestamp(epoch)
        .map_err(|_| Error::Contract(format!("sun time out of range: {epoch}")))?
        .to_offset(offset);
    Ok(format!("{:02}:{:02}", local.hour(), local.minute()))
}
