use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::auth::User;
use crate::entities::{DriverState, DriverStatus};
use crate::error::Error;
use crate::server::DynAPI;

/// Driver state plus the texts the app shows for its status.
#[derive(Serialize)]
pub struct DriverView {
    #[serde(flatten)]
    state: DriverState,
    available: bool,
    status_label: &'static str,
    status_description: &'static str,
}

impl From<DriverState> for DriverView {
    fn from(state: DriverState) -> Self {
        Self {
            available: state.is_available(),
            status_label: state.status.label(),
            status_description: state.status.description(),
            state,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct UpdateStatusParams {
    status: DriverStatus,
}

/// A rate as typed in the admin form, or already a number.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
pub enum RateInput {
    Text(String),
    Number(f64),
}

impl RateInput {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct UpdateTariffsParams {
    day_rate: RateInput,
    night_rate: RateInput,
}

#[derive(Serialize, Deserialize)]
pub struct UpdatePhoneNumberParams {
    phone_number: String,
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    user: User,
) -> Result<Json<DriverView>, Error> {
    let state = api.find_driver_state(user).await?;

    Ok(DriverView::from(state).into())
}

pub async fn update_status(
    Extension(api): Extension<DynAPI>,
    user: User,
    Json(params): Json<UpdateStatusParams>,
) -> Result<Json<DriverView>, Error> {
    let state = api.update_driver_status(user, params.status).await?;

    Ok(DriverView::from(state).into())
}

pub async fn update_tariffs(
    Extension(api): Extension<DynAPI>,
    user: User,
    Json(params): Json<UpdateTariffsParams>,
) -> Result<Json<DriverView>, Error> {
    let day_rate = params.day_rate.into_text();
    let night_rate = params.night_rate.into_text();

    let state = api.update_tariffs(user, &day_rate, &night_rate).await?;

    Ok(DriverView::from(state).into())
}

pub async fn update_phone_number(
    Extension(api): Extension<DynAPI>,
    user: User,
    Json(params): Json<UpdatePhoneNumberParams>,
) -> Result<Json<DriverView>, Error> {
    let state = api
        .update_driver_phone_number(user, &params.phone_number)
        .await?;

    Ok(DriverView::from(state).into())
}
