//! HTTP client for the backend, as used by the mobile app.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Url};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use std::time::Duration;

use crate::entities::{
    Coordinates, DriverState, DriverStatus, Member, Place, PlaceSuggestion, Quote, Route,
};
use crate::error::{
    invalid_input_error, not_found_error, unauthorized_error, upstream_error, Error,
};
use crate::external::PlacesProvider;

#[derive(Clone, Debug)]
pub struct BackendClient {
    base_url: String,
    admin_token: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Description {
    description: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            admin_token: None,
            client,
        })
    }

    pub fn with_admin_token(mut self, token: impl Into<String>) -> Self {
        self.admin_token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, Error> {
        let req = match &self.admin_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        };

        let res = req.send().await?;
        let status_code = res.status().as_u16();

        if res.status().is_success() {
            return Ok(res.json().await?);
        }

        let body: ErrorBody = res.json().await.unwrap_or_default();
        let message = body.error.unwrap_or_else(|| "API error".into());

        tracing::debug!("backend returned {}: {}", status_code, message);

        match status_code {
            403 => Err(unauthorized_error()),
            404 => Err(not_found_error(&message)),
            400..=499 => Err(invalid_input_error()),
            _ => Err(upstream_error()),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_member_by_phone_number(&self, phone_number: &str) -> Result<Member, Error> {
        self.send(
            self.client
                .get(self.url("/users"))
                .query(&[("phoneNumber", phone_number)]),
        )
        .await
    }

    pub async fn find_driver_state(&self) -> Result<DriverState, Error> {
        self.send(self.client.get(self.url("/driver"))).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_driver_status(&self, status: DriverStatus) -> Result<DriverState, Error> {
        self.send(
            self.client
                .patch(self.url("/driver/status"))
                .json(&json!({ "status": status })),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_tariffs(
        &self,
        day_rate: &str,
        night_rate: &str,
    ) -> Result<DriverState, Error> {
        self.send(
            self.client
                .patch(self.url("/driver/tariffs"))
                .json(&json!({ "day_rate": day_rate, "night_rate": night_rate })),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_driver_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<DriverState, Error> {
        self.send(
            self.client
                .patch(self.url("/driver/phone_number"))
                .json(&json!({ "phone_number": phone_number })),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_pickup_route(&self, passenger: Coordinates) -> Result<Option<Route>, Error> {
        self.send(
            self.client
                .get(self.url("/routes/pickup"))
                .query(&[("lat", passenger.lat), ("lng", passenger.lng)]),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn compute_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Option<Route>, Error> {
        self.send(
            self.client
                .post(self.url("/routes"))
                .json(&json!({ "origin": origin, "destination": destination })),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_quote(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Option<Quote>, Error> {
        self.send(
            self.client
                .post(self.url("/quotes"))
                .json(&json!({ "origin": origin, "destination": destination })),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn describe_location(&self, coordinates: Coordinates) -> Result<String, Error> {
        let data: Description = self
            .send(
                self.client
                    .get(self.url("/geocode"))
                    .query(&[("lat", coordinates.lat), ("lng", coordinates.lng)]),
            )
            .await?;

        Ok(data.description)
    }
}

#[async_trait]
impl PlacesProvider for BackendClient {
    #[tracing::instrument(skip(self))]
    async fn autocomplete(&self, input: &str) -> Result<Vec<PlaceSuggestion>, Error> {
        self.send(
            self.client
                .get(self.url("/places/suggestions"))
                .query(&[("input", input)]),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn place_details(&self, place_id: &str) -> Result<Option<Place>, Error> {
        let mut url = Url::parse(&self.url("/places/details")).map_err(|_| invalid_input_error())?;
        url.path_segments_mut()
            .map_err(|_| invalid_input_error())?
            .push(place_id);

        self.send(self.client.get(url)).await
    }
}
