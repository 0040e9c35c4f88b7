//! Data models for the heat health assistant
//!
//! - Weather: current conditions for a city
//! - Place: points of interest grouped by search category
//! - Report: the aggregated response served to the front end

pub mod place;
pub mod report;
pub mod weather;

pub use place::{NearbyPlaces, Place, PlaceCategory};
pub use report::HeatReport;
pub use weather::WeatherReading;
