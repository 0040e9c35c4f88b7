//! Simulated theatre schedule and the "movies playing now" lookup

use std::sync::LazyLock;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// One screening; `[start, end)` in whole local hours
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Showing {
    pub movie: String,
    pub start: u8,
    pub end: u8,
}

impl Showing {
    fn new(movie: &str, start: u8, end: u8) -> Self {
        Self {
            movie: movie.to_string(),
            start,
            end,
        }
    }

    #[must_use]
    pub fn is_showing_at(&self, hour: u8) -> bool {
        self.start <= hour && hour < self.end
    }
}

/// Venue name to its ordered showings. Venue order is kept when serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TheatreSchedule {
    venues: Vec<(String, Vec<Showing>)>,
}

pub static THEATRE_SCHEDULE: LazyLock<TheatreSchedule> = LazyLock::new(|| TheatreSchedule {
    venues: vec![
        (
            "SPI Cinemas - Ampa Skywalk".to_string(),
            vec![
                Showing::new("Spider-Man", 10, 13),
                Showing::new("Dune", 14, 17),
                Showing::new("Barbie", 18, 21),
            ],
        ),
        (
            "PVR Cinemas - Phoenix Marketcity".to_string(),
            vec![
                Showing::new("Fast X", 11, 14),
                Showing::new("Barbie", 15, 18),
                Showing::new("Dune", 19, 22),
            ],
        ),
    ],
});

impl TheatreSchedule {
    #[must_use]
    pub fn showings(&self, venue: &str) -> Option<&[Showing]> {
        self.venues
            .iter()
            .find(|(name, _)| name == venue)
            .map(|(_, showings)| showings.as_slice())
    }

    /// Titles on screen at `venue` during `hour`; unknown venues show nothing.
    #[must_use]
    pub fn movies_showing(&self, venue: &str, hour: u8) -> Vec<&str> {
        self.showings(venue)
            .unwrap_or_default()
            .iter()
            .filter(|showing| showing.is_showing_at(hour))
            .map(|showing| showing.movie.as_str())
            .collect()
    }

    /// Terminal rendering used next to a cinema in the CLI report
    #[must_use]
    pub fn describe_now(&self, venue: &str, hour: u8) -> String {
        let movies = self.movies_showing(venue, hour);
        if movies.is_empty() {
            "No movies showing now".to_string()
        } else {
            movies.join(", ")
        }
    }

    pub fn venues(&self) -> impl Iterator<Item = &str> {
        self.venues.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for TheatreSchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.venues.len()))?;
        for (venue, showings) in &self.venues {
            map.serialize_entry(venue, showings)?;
        }
        map.end()
    }
}
