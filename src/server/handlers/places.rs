use axum::extract::{Extension, Json, Path, Query};
use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, Place, PlaceSuggestion};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct SuggestionParams {
    input: String,
}

#[derive(Serialize, Deserialize)]
pub struct Description {
    pub description: String,
}

pub async fn find_suggestions(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<SuggestionParams>,
) -> Result<Json<Vec<PlaceSuggestion>>, Error> {
    let suggestions = api.list_place_suggestions(&params.input).await?;

    Ok(suggestions.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(place_id): Path<String>,
) -> Result<Json<Option<Place>>, Error> {
    let place = api.find_place(&place_id).await?;

    Ok(place.into())
}

pub async fn describe(
    Extension(api): Extension<DynAPI>,
    Query(coordinates): Query<Coordinates>,
) -> Result<Json<Description>, Error> {
    let description = api.describe_location(coordinates).await?;

    Ok(Description { description }.into())
}
