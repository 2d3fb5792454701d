//! Error types for skycast-provider.

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when fetching weather from the provider.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested city was empty or missing. Raised before any network
    /// call is made.
    #[error("city must not be empty")]
    EmptyCity,

    /// The provider does not know the requested city.
    #[error("city not found: {0}")]
    CityNotFound(String),

    /// The provider answered with a non-success status other than 404.
    /// The status is carried so the HTTP layer can pass it through.
    #[error("weather provider returned status {status}")]
    UpstreamStatus { status: u16 },

    /// The outbound request exceeded the configured timeout.
    #[error("weather provider request timed out")]
    Timeout,

    /// The provider could not be reached at the transport level.
    #[error("weather provider unreachable: {0}")]
    Unavailable(#[source] reqwest::Error),

    /// The provider answered with success but the payload was missing
    /// required fields or otherwise malformed.
    #[error("unexpected provider payload: {0}")]
    Contract(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::EmptyCity.to_string(), "city must not be empty");
        assert_eq!(
            Error::CityNotFound("Atlantis".to_string()).to_string(),
            "city not found: Atlantis"
        );
        assert_eq!(
            Error::UpstreamStatus { status: 503 }.to_string(),
            "weather provider returned status 503"
        );
        assert!(
            Error::Contract("weather array is empty".to_string())
                .to_string()
                .contains("weather array")
        );
    }
}
