use super::Engine;

use async_trait::async_trait;

use crate::{
    api::{DriverAPI, RouteAPI},
    auth::User,
    entities::{current_hour, Coordinates, Quote, Route},
    error::Error,
    routing,
};

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn compute_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Option<Route>, Error> {
        Ok(routing::compute_route(&*self.maps, origin, destination).await)
    }

    #[tracing::instrument(skip(self))]
    async fn find_pickup_route(&self, passenger: Coordinates) -> Result<Option<Route>, Error> {
        Ok(routing::compute_route(&*self.maps, self.taxi_location, passenger).await)
    }

    #[tracing::instrument(skip(self))]
    async fn create_quote(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Option<Quote>, Error> {
        let state = self.find_driver_state(User::new_anonymous_user()).await?;

        let quote = routing::quote(
            &*self.maps,
            origin,
            destination,
            &state.tariffs,
            current_hour(),
        )
        .await;

        Ok(quote)
    }
}
