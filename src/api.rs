use async_trait::async_trait;

use crate::auth::User;
use crate::entities::{
    Coordinates, DriverState, DriverStatus, Member, Place, PlaceSuggestion, Quote, Route,
};
use crate::error::Error;

#[async_trait]
pub trait MemberAPI {
    async fn find_member_by_phone_number(&self, phone_number: &str) -> Result<Member, Error>;
}

#[async_trait]
pub trait DriverAPI {
    async fn find_driver_state(&self, user: User) -> Result<DriverState, Error>;
    async fn update_driver_status(
        &self,
        user: User,
        status: DriverStatus,
    ) -> Result<DriverState, Error>;
    async fn update_tariffs(
        &self,
        user: User,
        day_rate: &str,
        night_rate: &str,
    ) -> Result<DriverState, Error>;
    async fn update_driver_phone_number(
        &self,
        user: User,
        phone_number: &str,
    ) -> Result<DriverState, Error>;
}

#[async_trait]
pub trait RouteAPI {
    async fn compute_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Option<Route>, Error>;
    async fn find_pickup_route(&self, passenger: Coordinates) -> Result<Option<Route>, Error>;
    async fn create_quote(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Option<Quote>, Error>;
}

#[async_trait]
pub trait PlaceAPI {
    async fn list_place_suggestions(&self, input: &str) -> Result<Vec<PlaceSuggestion>, Error>;
    async fn find_place(&self, place_id: &str) -> Result<Option<Place>, Error>;
    async fn describe_location(&self, coordinates: Coordinates) -> Result<String, Error>;
}

pub trait API: MemberAPI + DriverAPI + RouteAPI + PlaceAPI {}
