mod driver_api;
mod helpers;
mod member_api;
mod place_api;
mod route_api;

use oso::Oso;
use sqlx::Pool;

use crate::{
    api::API,
    auth::authorizor,
    db::{self, Database},
    entities::Coordinates,
    error::{unauthorized_error, Error},
    external::DynMaps,
};

pub struct Engine {
    pool: Pool<Database>,
    authorizor: Oso,
    maps: DynMaps,
    taxi_location: Coordinates,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip(pool, maps))]
    pub async fn new(
        pool: Pool<Database>,
        maps: DynMaps,
        taxi_location: Coordinates,
    ) -> Result<Self, Error> {
        db::migrate(&pool).await?;

        Ok(Self {
            pool,
            authorizor: authorizor::new()?,
            maps,
            taxi_location,
        })
    }
}

impl Engine {
    pub fn authorize<Actor, Action, Resource>(
        &self,
        actor: Actor,
        action: Action,
        resource: Resource,
    ) -> Result<(), Error>
    where
        Actor: oso::ToPolar,
        Action: oso::ToPolar,
        Resource: oso::ToPolar,
    {
        if self.authorizor.is_allowed(actor, action, resource)? {
            return Ok(());
        }

        Err(unauthorized_error())
    }
}

impl API for Engine {}
