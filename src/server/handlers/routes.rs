use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, Route};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    pub origin: Coordinates,
    pub destination: Coordinates,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<Option<Route>>, Error> {
    let route = api
        .compute_route(params.origin, params.destination)
        .await?;

    Ok(route.into())
}

pub async fn pickup(
    Extension(api): Extension<DynAPI>,
    Query(passenger): Query<Coordinates>,
) -> Result<Json<Option<Route>>, Error> {
    let route = api.find_pickup_route(passenger).await?;

    Ok(route.into())
}
