//! Current weather lookup by city name

use async_trait::async_trait;

use crate::Result;
use crate::models::WeatherReading;

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Resolves a free-text city name into current conditions.
///
/// Implementations fail with `CityNotFound` when the provider cannot resolve
/// the city and `ProviderUnavailable` for any other non-success answer.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, city: &str) -> Result<WeatherReading>;
}
