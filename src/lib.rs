//! Heat health assistant
//!
//! Aggregates current weather, AI-generated health tips and nearby places
//! into a single response for a web front end, plus a terminal report.

pub mod advice;
pub mod api;
pub mod assistant;
pub mod config;
pub mod error;
pub mod heat;
pub mod logging;
pub mod models;
pub mod places;
pub mod report;
pub mod schedule;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use advice::{AdviceOutcome, AdviceProvider, AdviceService, GeminiClient};
pub use assistant::{Assessment, HeatAssistant};
pub use config::HeatHealthConfig;
pub use error::HeatHealthError;
pub use heat::{HospitalAdvisory, heat_index};
pub use models::{HeatReport, NearbyPlaces, Place, PlaceCategory, WeatherReading};
pub use places::{GeoapifyClient, PlacesProvider};
pub use schedule::{THEATRE_SCHEDULE, TheatreSchedule};
pub use weather::{OpenWeatherClient, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, HeatHealthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
