use super::Engine;

use async_trait::async_trait;

use crate::{
    api::PlaceAPI,
    entities::{Coordinates, Place, PlaceSuggestion},
    error::Error,
    routing,
};

#[async_trait]
impl PlaceAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn list_place_suggestions(&self, input: &str) -> Result<Vec<PlaceSuggestion>, Error> {
        self.maps.autocomplete(input).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_place(&self, place_id: &str) -> Result<Option<Place>, Error> {
        self.maps.place_details(place_id).await
    }

    #[tracing::instrument(skip(self))]
    async fn describe_location(&self, coordinates: Coordinates) -> Result<String, Error> {
        Ok(routing::describe_location(&*self.maps, coordinates).await)
    }
}
