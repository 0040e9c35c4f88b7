//! Geoapify Places API client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::PlacesProvider;
use crate::config::PlacesConfig;
use crate::models::{Place, PlaceCategory};
use crate::{HeatHealthError, Result};

const PROVIDER: &str = "places";

pub struct GeoapifyClient {
    client: Client,
    api_key: String,
    base_url: String,
    radius_meters: u32,
    limit: u32,
}

/// GeoJSON feature collection returned by `v2/places`
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    name: Option<String>,
    formatted: Option<String>,
    address_line2: Option<String>,
}

impl From<Properties> for Place {
    fn from(props: Properties) -> Self {
        Place {
            name: props.name.unwrap_or_else(|| "Unknown".to_string()),
            formatted: props.formatted.unwrap_or_default(),
            address: props.address_line2.unwrap_or_default(),
        }
    }
}

impl GeoapifyClient {
    pub fn new(client: Client, config: &PlacesConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| HeatHealthError::config("places.api_key is not set"))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            radius_meters: config.radius_meters,
            limit: config.limit,
        })
    }

    /// Geoapify circles are written `lon,lat,radius`
    fn url(&self, latitude: f64, longitude: f64, category: PlaceCategory) -> String {
        format!(
            "{}/v2/places?categories={}&filter=circle:{},{},{}&limit={}&apiKey={}",
            self.base_url,
            category.provider_tag(),
            longitude,
            latitude,
            self.radius_meters,
            self.limit,
            self.api_key
        )
    }
}

#[async_trait]
impl PlacesProvider for GeoapifyClient {
    #[instrument(skip(self))]
    async fn search(
        &self,
        latitude: f64,
        longitude: f64,
        category: PlaceCategory,
    ) -> Result<Vec<Place>> {
        let response = self
            .client
            .get(self.url(latitude, longitude, category))
            .send()
            .await
            .map_err(|e| HeatHealthError::transport(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "Geoapify API error for {}: {}",
                category.provider_tag(),
                status
            );
            return Err(HeatHealthError::unavailable(
                PROVIDER,
                Some(status.as_u16()),
                format!("places API answered with status {status}"),
            ));
        }

        let collection: FeatureCollection = response.json().await.map_err(|e| {
            HeatHealthError::malformed(
                PROVIDER,
                format!("Failed to parse places response: {}", e.without_url()),
            )
        })?;

        let places: Vec<Place> = collection
            .features
            .into_iter()
            .take(self.limit as usize)
            .map(|feature| feature.properties.into())
            .collect();

        debug!("Found {} {} places", places.len(), category.key());
        Ok(places)
    }
}
