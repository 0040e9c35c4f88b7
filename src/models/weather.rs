//! Weather reading model and display methods

use serde::{Deserialize, Serialize};

/// Current conditions for a city, produced fresh for every request
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReading {
    /// City name as reported by the provider
    pub city: String,
    /// Country code (ISO 3166-1 alpha-2)
    pub country: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Human-readable description of weather conditions
    pub description: String,
    /// Latitude in decimal degrees
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl WeatherReading {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°C", self.temperature)
    }

    #[must_use]
    pub fn format_humidity(&self) -> String {
        format!("{}%", self.humidity)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chennai() -> WeatherReading {
        WeatherReading {
            city: "Chennai".to_string(),
            country: "IN".to_string(),
            temperature: 35.2,
            humidity: 68.0,
            description: "haze".to_string(),
            latitude: 13.0827,
            longitude: 80.2707,
        }
    }

    #[test]
    fn test_formatting() {
        let reading = chennai();
        assert_eq!(reading.format_temperature(), "35.2°C");
        assert_eq!(reading.format_humidity(), "68%");
        assert_eq!(reading.format_coordinates(), "13.0827, 80.2707");
    }

    #[test]
    fn test_serializes_coordinates_as_lat_lon() {
        let value = serde_json::to_value(chennai()).unwrap();
        assert_eq!(value["lat"], 13.0827);
        assert_eq!(value["lon"], 80.2707);
        assert!(value.get("latitude").is_none());
    }
}
