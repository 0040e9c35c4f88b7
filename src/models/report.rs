//! Aggregated response returned to the front end

use serde::Serialize;

use super::{NearbyPlaces, Place, WeatherReading};
use crate::heat::{HospitalAdvisory, heat_index};
use crate::schedule::{THEATRE_SCHEDULE, TheatreSchedule};

/// Weather, advice and places for one city, in the shape the front end expects
#[derive(Debug, Clone, Serialize)]
pub struct HeatReport {
    #[serde(flatten)]
    pub weather: WeatherReading,
    /// Heat index in Celsius
    pub feels_like: f64,
    pub hospital_advisory: String,
    pub tips: Vec<String>,
    pub places: NearbyPlaces,
    pub theatre_schedule: &'static TheatreSchedule,
}

impl HeatReport {
    /// Assemble a report; derived fields are computed from the reading
    #[must_use]
    pub fn new(weather: WeatherReading, tips: Vec<String>, places: NearbyPlaces) -> Self {
        Self {
            feels_like: heat_index(weather.temperature, weather.humidity),
            hospital_advisory: HospitalAdvisory::for_temperature(weather.temperature)
                .message()
                .to_string(),
            weather,
            tips,
            places,
            theatre_schedule: &THEATRE_SCHEDULE,
        }
    }

    /// Fixed payload for exercising the front end without upstream calls
    #[must_use]
    pub fn sample() -> Self {
        let place = |name: &str, formatted: &str| {
            vec![Place {
                name: name.to_string(),
                formatted: formatted.to_string(),
                address: String::new(),
            }]
        };

        let weather = WeatherReading {
            city: "Chennai".to_string(),
            country: "IN".to_string(),
            temperature: 35.2,
            humidity: 68.0,
            description: "hot and humid".to_string(),
            latitude: 13.0827,
            longitude: 80.2707,
        };

        let tips = vec![
            "Drink small amounts of water often rather than a lot at once.".to_string(),
            "Avoid direct sunlight between 11am-4pm. Use shade and hats.".to_string(),
            "Wear loose, light-colored clothing and rest frequently.".to_string(),
        ];

        let places = NearbyPlaces {
            hotel: place("Hotel SeaView", "Raja St, Chennai"),
            hospital: place("Apollo Hospital", "Greams Rd"),
            movie_theater: place("PVR Phoenix", "Velachery"),
            shopping_mall: place("Phoenix MarketCity", "Velachery"),
            cafe: place("Brew & Co", "Mount Road"),
        };

        Self::new(weather, tips, places)
    }
}
