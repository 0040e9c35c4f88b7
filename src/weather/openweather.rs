//! OpenWeatherMap current weather client

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::WeatherProvider;
use crate::config::WeatherConfig;
use crate::models::WeatherReading;
use crate::{HeatHealthError, Result};

const PROVIDER: &str = "weather";
const DEFAULT_NOT_FOUND: &str = "City not found!";

pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// `data/2.5/weather` response, reduced to the fields we use
#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    #[serde(default)]
    cod: Option<Value>,
    #[serde(default)]
    name: String,
    coord: Coord,
    main: Main,
    weather: Vec<Condition>,
    #[serde(default)]
    sys: Sys,
}

#[derive(Debug, Deserialize)]
struct Coord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct Main {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct Sys {
    #[serde(default)]
    country: String,
}

/// Error body, e.g. `{"cod": "404", "message": "city not found"}`
#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    cod: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// `cod` arrives as a number on success and as a string on errors
fn cod_value(cod: &Value) -> Option<u16> {
    match cod {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn classify_failure(status: u16, message: Option<String>) -> HeatHealthError {
    if status == StatusCode::NOT_FOUND.as_u16() {
        HeatHealthError::city_not_found(message.unwrap_or_else(|| DEFAULT_NOT_FOUND.to_string()))
    } else {
        HeatHealthError::unavailable(
            PROVIDER,
            Some(status),
            message.unwrap_or_else(|| format!("weather API answered with status {status}")),
        )
    }
}

impl OpenWeatherClient {
    pub fn new(client: Client, config: &WeatherConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| HeatHealthError::config("weather.api_key is not set"))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, city: &str) -> String {
        format!(
            "{}/data/2.5/weather?q={}&appid={}&units=metric",
            self.base_url,
            urlencoding::encode(city),
            self.api_key
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current_weather(&self, city: &str) -> Result<WeatherReading> {
        let start_time = Instant::now();
        debug!("Requesting current weather");

        let response = self
            .client
            .get(self.url(city))
            .send()
            .await
            .map_err(|e| HeatHealthError::transport(PROVIDER, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HeatHealthError::transport(PROVIDER, e))?;

        if !status.is_success() {
            let error: ErrorResponse = serde_json::from_str(&body).unwrap_or_default();
            let code = error
                .cod
                .as_ref()
                .and_then(cod_value)
                .unwrap_or(status.as_u16());
            warn!("Weather API returned {}: {:?}", status, error.message);
            return Err(classify_failure(code, error.message));
        }

        let payload: CurrentWeatherResponse = serde_json::from_str(&body).map_err(|e| {
            HeatHealthError::malformed(PROVIDER, format!("Failed to parse weather response: {e}"))
        })?;

        if let Some(code) = payload.cod.as_ref().and_then(cod_value) {
            if code != 200 {
                let error: ErrorResponse = serde_json::from_str(&body).unwrap_or_default();
                return Err(classify_failure(code, error.message));
            }
        }

        let description = payload
            .weather
            .into_iter()
            .next()
            .map(|condition| condition.description)
            .ok_or_else(|| HeatHealthError::malformed(PROVIDER, "No weather conditions in response"))?;

        let reading = WeatherReading {
            city: payload.name,
            country: payload.sys.country,
            temperature: payload.main.temp,
            humidity: payload.main.humidity,
            description,
            latitude: payload.coord.lat,
            longitude: payload.coord.lon,
        };

        info!(
            "Weather for {} ({}): {} at {:.3}s",
            reading.city,
            reading.format_coordinates(),
            reading.format_temperature(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(reading)
    }
}
