//! Nearby places search and per-category fan-out

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::Result;
use crate::models::{NearbyPlaces, Place, PlaceCategory};

pub mod geoapify;

pub use geoapify::GeoapifyClient;

/// Radius search around a coordinate for one category
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn search(
        &self,
        latitude: f64,
        longitude: f64,
        category: PlaceCategory,
    ) -> Result<Vec<Place>>;
}

/// Searches every category in [`PlaceCategory::ALL`], one after another.
///
/// A failing category contributes an empty list; the others are unaffected.
#[instrument(skip(provider))]
pub async fn nearby_places(
    provider: &Arc<dyn PlacesProvider>,
    latitude: f64,
    longitude: f64,
) -> NearbyPlaces {
    let mut places = NearbyPlaces::default();

    for category in PlaceCategory::ALL {
        match provider.search(latitude, longitude, category).await {
            Ok(found) => places.set(category, found),
            Err(e) => warn!("Could not fetch {}: {}", category.provider_tag(), e),
        }
    }

    info!("Nearby places: {} places found", places.total());
    places
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeatHealthError;
    use std::sync::Mutex;

    /// Answers every category with one place, except `failing`
    struct StubProvider {
        failing: Option<PlaceCategory>,
        calls: Mutex<Vec<PlaceCategory>>,
    }

    #[async_trait]
    impl PlacesProvider for StubProvider {
        async fn search(
            &self,
            _latitude: f64,
            _longitude: f64,
            category: PlaceCategory,
        ) -> Result<Vec<Place>> {
            self.calls.lock().unwrap().push(category);
            if Some(category) == self.failing {
                return Err(HeatHealthError::unavailable("places", Some(500), "boom"));
            }
            Ok(vec![Place {
                name: format!("{} place", category.key()),
                formatted: "Somewhere".to_string(),
                address: String::new(),
            }])
        }
    }

    #[tokio::test]
    async fn test_failed_category_is_isolated() {
        let stub = Arc::new(StubProvider {
            failing: Some(PlaceCategory::Hospital),
            calls: Mutex::new(Vec::new()),
        });
        let provider: Arc<dyn PlacesProvider> = stub.clone();

        let places = nearby_places(&provider, 13.08, 80.27).await;

        assert!(places.hospital.is_empty());
        for category in [
            PlaceCategory::Hotel,
            PlaceCategory::MovieTheater,
            PlaceCategory::ShoppingMall,
            PlaceCategory::Cafe,
        ] {
            assert_eq!(places.get(category).len(), 1, "{category:?}");
        }
        assert_eq!(*stub.calls.lock().unwrap(), PlaceCategory::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_all_categories_populated() {
        let provider: Arc<dyn PlacesProvider> = Arc::new(StubProvider {
            failing: None,
            calls: Mutex::new(Vec::new()),
        });

        let places = nearby_places(&provider, 13.08, 80.27).await;

        assert_eq!(places.total(), 5);
        assert_eq!(places.movie_theater[0].name, "movie_theater place");
    }
}
