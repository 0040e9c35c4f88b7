//! Composes weather, advice and places into one report

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use reqwest::Client;
use tracing::{info, instrument};

use crate::advice::{AdviceOutcome, AdviceProvider, AdviceService, GeminiClient};
use crate::config::{HeatHealthConfig, HttpConfig};
use crate::models::{HeatReport, NearbyPlaces, WeatherReading};
use crate::places::{self, GeoapifyClient, PlacesProvider};
use crate::weather::{OpenWeatherClient, WeatherProvider};
use crate::{HeatHealthError, Result};

/// Everything the CLI needs beyond the serialized report
#[derive(Debug, Clone)]
pub struct Assessment {
    pub weather: WeatherReading,
    pub advice: AdviceOutcome,
    pub places: NearbyPlaces,
}

impl From<Assessment> for HeatReport {
    fn from(assessment: Assessment) -> Self {
        HeatReport::new(
            assessment.weather,
            assessment.advice.tips,
            assessment.places,
        )
    }
}

pub struct HeatAssistant {
    weather: Arc<dyn WeatherProvider>,
    advice: AdviceService,
    places: Arc<dyn PlacesProvider>,
}

/// Shared outbound client; no timeout unless one is configured
pub fn build_http_client(config: &HttpConfig) -> anyhow::Result<Client> {
    let mut builder = Client::builder().user_agent(config.user_agent.clone());
    if let Some(seconds) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(seconds));
    }
    builder.build().with_context(|| "Failed to create HTTP client")
}

impl HeatAssistant {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        advice: Arc<dyn AdviceProvider>,
        places: Arc<dyn PlacesProvider>,
    ) -> Self {
        Self {
            weather,
            advice: AdviceService::new(advice),
            places,
        }
    }

    /// Wire up the production providers from configuration
    pub fn from_config(config: &HeatHealthConfig) -> anyhow::Result<Self> {
        config.require_credentials()?;
        let client = build_http_client(&config.http)?;

        Ok(Self::new(
            Arc::new(OpenWeatherClient::new(client.clone(), &config.weather)?),
            Arc::new(GeminiClient::new(client.clone(), &config.advice)?),
            Arc::new(GeoapifyClient::new(client, &config.places)?),
        ))
    }

    /// Weather, then advice, then places, strictly in sequence.
    ///
    /// Only a weather failure is returned; advice and places degrade.
    #[instrument(skip(self))]
    pub async fn assess(&self, city: &str) -> Result<Assessment> {
        let city = city.trim();
        if city.is_empty() {
            return Err(HeatHealthError::validation("City parameter is required"));
        }

        let start_time = Instant::now();
        let weather = self.weather.current_weather(city).await?;
        let advice = self
            .advice
            .advise(city, weather.temperature, weather.humidity)
            .await;
        let places =
            places::nearby_places(&self.places, weather.latitude, weather.longitude).await;

        info!(
            "Report for {} ready in {:.3}s",
            city,
            start_time.elapsed().as_secs_f64()
        );

        Ok(Assessment {
            weather,
            advice,
            places,
        })
    }

    pub async fn report(&self, city: &str) -> Result<HeatReport> {
        self.assess(city).await.map(HeatReport::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::fallback_tips;
    use crate::models::{Place, PlaceCategory};
    use async_trait::async_trait;

    struct FixedWeather(Option<WeatherReading>);

    #[async_trait]
    impl WeatherProvider for FixedWeather {
        async fn current_weather(&self, _city: &str) -> Result<WeatherReading> {
            self.0
                .clone()
                .ok_or_else(|| HeatHealthError::city_not_found("city not found"))
        }
    }

    struct FailingAdvice;

    #[async_trait]
    impl AdviceProvider for FailingAdvice {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Err(HeatHealthError::unavailable("advice", None, "connection refused"))
        }
    }

    struct OnePlace;

    #[async_trait]
    impl PlacesProvider for OnePlace {
        async fn search(&self, _lat: f64, _lon: f64, category: PlaceCategory) -> Result<Vec<Place>> {
            Ok(vec![Place {
                name: category.key().to_string(),
                formatted: String::new(),
                address: String::new(),
            }])
        }
    }

    fn reading() -> WeatherReading {
        WeatherReading {
            city: "Chennai".to_string(),
            country: "IN".to_string(),
            temperature: 30.0,
            humidity: 50.0,
            description: "clear sky".to_string(),
            latitude: 13.08,
            longitude: 80.27,
        }
    }

    fn assistant(weather: Option<WeatherReading>) -> HeatAssistant {
        HeatAssistant::new(
            Arc::new(FixedWeather(weather)),
            Arc::new(FailingAdvice),
            Arc::new(OnePlace),
        )
    }

    #[tokio::test]
    async fn test_report_degrades_advice_but_keeps_everything_else() {
        let report = assistant(Some(reading())).report("Chennai").await.unwrap();

        assert_eq!(report.weather.city, "Chennai");
        assert!((report.feels_like - 45.8).abs() < 1e-9);
        assert_eq!(report.tips, fallback_tips());
        assert_eq!(report.places.total(), 5);
        assert_eq!(report.hospital_advisory, "Caution: stay hydrated while going");
    }

    #[tokio::test]
    async fn test_weather_failure_aborts_report() {
        let err = assistant(None).report("Atlantis").await.unwrap_err();
        assert!(matches!(err, HeatHealthError::CityNotFound { .. }));
    }

    #[tokio::test]
    async fn test_blank_city_is_rejected() {
        let err = assistant(Some(reading())).report("   ").await.unwrap_err();
        assert!(matches!(err, HeatHealthError::Validation { .. }));
    }

    #[test]
    fn test_from_config_requires_credentials() {
        let result = HeatAssistant::from_config(&HeatHealthConfig::default());
        let err = result.err().unwrap().to_string();
        assert!(err.contains("Missing API keys"));
    }

    #[test]
    fn test_build_http_client_with_timeout() {
        let config = HttpConfig {
            timeout_seconds: Some(10),
            ..HttpConfig::default()
        };
        assert!(build_http_client(&config).is_ok());
    }
}
