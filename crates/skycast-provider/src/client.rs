//! HTTP client for the provider's current-weather endpoint.

use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, warn};

use skycast_types::WeatherRecord;

use crate::error::{Error, Result};
use crate::payload::{self, CurrentWeatherPayload};

/// Default OpenWeatherMap endpoint for current weather.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Default outbound request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for [`OpenWeatherClient`].
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API key sent as the `appid` query parameter.
    pub api_key: String,
    /// Endpoint URL for current weather.
    pub base_url: String,
    /// Total timeout for one outbound request.
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Settings for the public OpenWeatherMap endpoint with the default
    /// timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Point the client at a different endpoint.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for fetching current weather by city name.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Build a client with the configured timeout baked into the HTTP pool.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::Unavailable)?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Fetch and normalize the current weather for a city.
    ///
    /// Units are fixed to metric. An empty or whitespace-only city fails
    /// with [`Error::EmptyCity`] before any network I/O. The provider's
    /// 404 becomes [`Error::CityNotFound`]; any other non-success status
    /// is carried through as [`Error::UpstreamStatus`].
    pub async fn fetch_current(&self, city: &str) -> Result<WeatherRecord> {
        let city = city.trim();
        if city.is_empty() {
            return Err(Error::EmptyCity);
        }

        debug!(city, "fetching current weather");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(classify_transport)?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                warn!(city, "provider does not know this city");
                Err(Error::CityNotFound(city.to_string()))
            }
            status if !status.is_success() => {
                warn!(city, status = status.as_u16(), "provider returned an error status");
                Err(Error::UpstreamStatus {
                    status: status.as_u16(),
                })
            }
            _ => {
                // Reading the body can fail at the transport level too;
                // only a parse failure is the provider breaking contract.
                let body = response.bytes().await.map_err(classify_transport)?;
                let parsed: CurrentWeatherPayload = serde_json::from_slice(&body)
                    .map_err(|e| Error::Contract(e.to_string()))?;
                payload::normalize(parsed)
            }
        }
    }
}

/// Map a transport-level failure onto the provider error taxonomy.
fn classify_transport(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout
    } else {
        Error::Unavailable(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn london_payload() -> serde_json::Value {
        serde_json::json!({
            "coord": {"lon": -0.1257, "lat": 51.5085},
            "weather": [
                {"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}
            ],
            "main": {
                "temp": 15.549,
                "feels_like": 15.12,
                "temp_min": 14.02,
                "temp_max": 16.98,
                "pressure": 1012,
                "humidity": 72
            },
            "visibility": 10000,
            "wind": {"speed": 4.1, "deg": 80},
            "clouds": {"all": 75},
            "sys": {"country": "GB", "sunrise": 1699946975_i64, "sunset": 1699980978_i64},
            "timezone": 0,
            "name": "London"
        })
    }

    async fn client_for(server: &MockServer) -> OpenWeatherClient {
        OpenWeatherClient::new(
            ProviderConfig::new("test-key")
                .base_url(format!("{}/data/2.5/weather", server.uri()))
                .timeout(Duration::from_millis(500)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_current_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "London"))
            .and(query_param("appid", "test-key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(london_payload()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let record = client.fetch_current("London").await.unwrap();

        assert_eq!(record.city, "London");
        assert_eq!(record.country, "GB");
        assert_eq!(record.temperature, 15.5);
        assert_eq!(record.humidity, 72);
    }

    #[tokio::test]
    async fn test_fetch_current_trims_city() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "London"))
            .respond_with(ResponseTemplate::new(200).set_body_json(london_payload()))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let record = client.fetch_current("  London  ").await.unwrap();

        assert_eq!(record.city, "London");
    }

    #[tokio::test]
    async fn test_empty_city_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server).await;

        assert!(matches!(
            client.fetch_current("").await,
            Err(Error::EmptyCity)
        ));
        assert!(matches!(
            client.fetch_current("   ").await,
            Err(Error::EmptyCity)
        ));
    }

    #[tokio::test]
    async fn test_not_found_city() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.fetch_current("Atlantis").await;

        assert!(matches!(result, Err(Error::CityNotFound(city)) if city == "Atlantis"));
    }

    #[tokio::test]
    async fn test_upstream_status_carried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.fetch_current("London").await;

        assert!(matches!(result, Err(Error::UpstreamStatus { status: 503 })));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(london_payload())
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.fetch_current("London").await;

        assert!(matches!(result, Err(Error::Timeout)));
    }

    #[tokio::test]
    async fn test_unreachable_provider() {
        // Port 1 is never listening.
        let client = OpenWeatherClient::new(
            ProviderConfig::new("test-key").base_url("http://127.0.0.1:1/weather"),
        )
        .unwrap();

        let result = client.fetch_current("London").await;
        assert!(matches!(result, Err(Error::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_non_json_body_is_contract_violation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.fetch_current("London").await;

        assert!(matches!(result, Err(Error::Contract(_))));
    }

    #[tokio::test]
    async fn test_malformed_success_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "London"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.fetch_current("London").await;

        assert!(matches!(result, Err(Error::Contract(_))));
    }
}
