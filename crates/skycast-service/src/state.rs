//! Application state shared across handlers.

use std::sync::Arc;

use skycast_provider::OpenWeatherClient;
use skycast_store::Store;
use tokio::sync::Mutex;

/// Shared application state.
pub struct AppState {
    /// The history store (wrapped in Mutex for thread-safe access).
    pub store: Mutex<Store>,
    /// Weather provider client.
    pub weather: OpenWeatherClient,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Store, weather: OpenWeatherClient) -> Arc<Self> {
        Arc::new(Self {
            store: Mutex::new(store),
            weather,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_provider::ProviderConfig;
    use skycast_types::LookupRecord;

    fn test_state() -> Arc<AppState> {
        let store = Store::open_in_memory().unwrap();
        let weather = OpenWeatherClient::new(ProviderConfig::new("test-key")).unwrap();
        AppState::new(store, weather)
    }

    #[tokio::test]
    async fn test_app_state_store_access() {
        let state = test_state();

        let store = state.store.lock().await;
        assert!(store.recent(10).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_app_state_store_operations() {
        let state = test_state();

        {
            let store = state.store.lock().await;
            store
                .append(&LookupRecord {
                    city_name: "London".to_string(),
                    country: Some("GB".to_string()),
                    temperature: Some(15.5),
                    weather_description: Some("broken clouds".to_string()),
                    humidity: Some(72),
                    wind_speed: Some(4.1),
                })
                .unwrap();
        }

        let store = state.store.lock().await;
        let entries = store.recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].city_name, "London");
    }
}
