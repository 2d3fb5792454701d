//! HTTP REST API for weather lookups with persisted search history.
//!
//! This crate provides a service that:
//! - Fetches current weather from OpenWeatherMap by city name
//! - Records each successful lookup in the local database
//! - Exposes a REST API for weather and history queries
//!
//! # REST API Endpoints
//!
//! - `GET /` - Service metadata and endpoint listing
//! - `GET /api/weather?city={name}` - Current weather for a city
//! - `GET /api/history?limit={n}` - Recent lookups, newest first
//! - `DELETE /api/history` - Clear all history
//!
//! # Configuration
//!
//! The service reads configuration from `~/.config/skycast/server.toml`:
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8080"
//!
//! [storage]
//! path = "~/.local/share/skycast/history.db"
//!
//! [weather]
//! api_key = "your-openweathermap-key"
//! timeout_secs = 10
//! ```
//!
//! The API key can also be supplied via the `OPENWEATHER_API_KEY`
//! environment variable or the `--api-key` flag.

pub mod api;
pub mod config;
pub mod state;

pub use config::{Config, ConfigError, ServerConfig, StorageConfig, WeatherConfig};
pub use state::AppState;
