pub mod google_maps;

use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{Coordinates, Place, PlaceSuggestion};
use crate::error::Error;

pub use google_maps::{Directions, GoogleMaps, GoogleMapsConfig};

#[async_trait]
pub trait DirectionsProvider {
    /// Directions for departing now, with live traffic.
    async fn find_directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Directions, Error>;
}

#[async_trait]
pub trait GeocodingProvider {
    /// Formatted address of the first result, `None` when the provider has
    /// no answer.
    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<Option<String>, Error>;
}

#[async_trait]
pub trait PlacesProvider {
    async fn autocomplete(&self, input: &str) -> Result<Vec<PlaceSuggestion>, Error>;
    async fn place_details(&self, place_id: &str) -> Result<Option<Place>, Error>;
}

pub trait MapsProvider: DirectionsProvider + GeocodingProvider + PlacesProvider {}

impl<T> MapsProvider for T where T: DirectionsProvider + GeocodingProvider + PlacesProvider {}

pub type DynMaps = Arc<dyn MapsProvider + Send + Sync>;
