use axum::extract::{Extension, Json};

use crate::entities::Quote;
use crate::error::Error;
use crate::server::handlers::routes::CreateParams;
use crate::server::DynAPI;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<Option<Quote>>, Error> {
    let quote = api.create_quote(params.origin, params.destination).await?;

    Ok(quote.into())
}
