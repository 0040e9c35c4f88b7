//! Points of interest grouped by the fixed search categories

use serde::{Deserialize, Serialize};

/// A single search result from the places provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Place {
    pub name: String,
    /// Full formatted address
    pub formatted: String,
    /// Secondary address line
    #[serde(default)]
    pub address: String,
}

/// The five place types searched for every report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceCategory {
    Hotel,
    Hospital,
    MovieTheater,
    ShoppingMall,
    Cafe,
}

impl PlaceCategory {
    /// Search order, which is also the key order of [`NearbyPlaces`]
    pub const ALL: [PlaceCategory; 5] = [
        PlaceCategory::Hotel,
        PlaceCategory::Hospital,
        PlaceCategory::MovieTheater,
        PlaceCategory::ShoppingMall,
        PlaceCategory::Cafe,
    ];

    /// Key used in the aggregated response
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            PlaceCategory::Hotel => "hotel",
            PlaceCategory::Hospital => "hospital",
            PlaceCategory::MovieTheater => "movie_theater",
            PlaceCategory::ShoppingMall => "shopping_mall",
            PlaceCategory::Cafe => "cafe",
        }
    }

    /// Category tag understood by the places provider
    #[must_use]
    pub fn provider_tag(self) -> &'static str {
        match self {
            PlaceCategory::Hotel => "accommodation.hotel",
            PlaceCategory::Hospital => "healthcare.hospital",
            PlaceCategory::MovieTheater => "entertainment.cinema",
            PlaceCategory::ShoppingMall => "commercial.shopping_mall",
            PlaceCategory::Cafe => "catering.cafe",
        }
    }

    /// Plural heading for terminal output, e.g. "Movie Theaters"
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            PlaceCategory::Hotel => "Hotels",
            PlaceCategory::Hospital => "Hospitals",
            PlaceCategory::MovieTheater => "Movie Theaters",
            PlaceCategory::ShoppingMall => "Shopping Malls",
            PlaceCategory::Cafe => "Cafes",
        }
    }
}

/// Places found per category; every category is always present
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct NearbyPlaces {
    pub hotel: Vec<Place>,
    pub hospital: Vec<Place>,
    pub movie_theater: Vec<Place>,
    pub shopping_mall: Vec<Place>,
    pub cafe: Vec<Place>,
}

impl NearbyPlaces {
    #[must_use]
    pub fn get(&self, category: PlaceCategory) -> &[Place] {
        match category {
            PlaceCategory::Hotel => &self.hotel,
            PlaceCategory::Hospital => &self.hospital,
            PlaceCategory::MovieTheater => &self.movie_theater,
            PlaceCategory::ShoppingMall => &self.shopping_mall,
            PlaceCategory::Cafe => &self.cafe,
        }
    }

    pub fn set(&mut self, category: PlaceCategory, places: Vec<Place>) {
        let slot = match category {
            PlaceCategory::Hotel => &mut self.hotel,
            PlaceCategory::Hospital => &mut self.hospital,
            PlaceCategory::MovieTheater => &mut self.movie_theater,
            PlaceCategory::ShoppingMall => &mut self.shopping_mall,
            PlaceCategory::Cafe => &mut self.cafe,
        };
        *slot = places;
    }

    /// Total number of places across all categories
    #[must_use]
    pub fn total(&self) -> usize {
        PlaceCategory::ALL
            .iter()
            .map(|category| self.get(*category).len())
            .sum()
    }
}
