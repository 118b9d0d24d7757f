use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::entities::Member;
use crate::error::{invalid_input_error, Error};
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct FindParams {
    #[serde(rename = "phoneNumber")]
    phone_number: Option<String>,
}

pub async fn find_by_phone_number(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<FindParams>,
) -> Result<Json<Member>, Error> {
    let phone_number = params.phone_number.ok_or_else(invalid_input_error)?;

    tracing::info!("looking up member by phone number");

    let member = api.find_member_by_phone_number(&phone_number).await?;

    tracing::info!(is_admin = member.is_admin(), "member found");

    Ok(member.into())
}
