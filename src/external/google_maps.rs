use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

use crate::{
    entities::{Coordinates, Place, PlaceSuggestion, DEFAULT_PLACE_LABEL},
    error::{invalid_input_error, upstream_error, upstream_status_error, Error},
    external::{DirectionsProvider, GeocodingProvider, PlacesProvider},
};

#[derive(Clone, Debug)]
pub struct GoogleMapsConfig {
    pub scheme: String,
    pub api_base: String,
    pub api_key: String,
    pub language: String,
    pub country: String,
    pub timeout_secs: u64,
}

impl Default for GoogleMapsConfig {
    fn default() -> Self {
        Self {
            scheme: "https".into(),
            api_base: "maps.googleapis.com".into(),
            api_key: "".into(),
            language: "ro".into(),
            country: "ro".into(),
            timeout_secs: 10,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GoogleMaps {
    config: GoogleMapsConfig,
    client: reqwest::Client,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Directions {
    pub status: String,
    pub error_message: Option<String>,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub legs: Vec<Leg>,
    pub overview_polyline: Option<OverviewPolyline>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Leg {
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
    pub duration_in_traffic: Option<TextValue>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OverviewPolyline {
    pub points: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response<T> {
    status: String,
    error_message: Option<String>,
    result: Option<T>,
    results: Option<T>,
    predictions: Option<T>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct GeocodingResult {
    formatted_address: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct PlaceDetails {
    name: Option<String>,
    formatted_address: Option<String>,
    geometry: Option<Geometry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Geometry {
    location: Coordinates,
}

impl GoogleMaps {
    pub fn new(config: GoogleMapsConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn url(&self, service: &str) -> String {
        format!(
            "{}://{}/maps/api/{}/json",
            self.config.scheme, self.config.api_base, service
        )
    }

    async fn get<T: DeserializeOwned>(
        &self,
        service: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let res = self
            .client
            .get(self.url(service))
            .query(&[("key", &self.config.api_key)])
            .query(params)
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if (400..500).contains(&status_code) {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        Ok(res.json().await?)
    }
}

#[async_trait]
impl DirectionsProvider for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn find_directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Directions, Error> {
        self.get(
            "directions",
            &[
                ("origin", origin.into()),
                ("destination", destination.into()),
                ("departure_time", "now".into()),
                ("traffic_model", "best_guess".into()),
            ],
        )
        .await
    }
}

#[async_trait]
impl GeocodingProvider for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<Option<String>, Error> {
        let data: Response<Vec<GeocodingResult>> = self
            .get("geocode", &[("latlng", coordinates.into())])
            .await?;

        if data.status != "OK" {
            tracing::debug!("geocoding returned {}", data.status);
            return Ok(None);
        }

        Ok(data
            .results
            .and_then(|results| results.into_iter().next())
            .map(|result| result.formatted_address))
    }
}

#[async_trait]
impl PlacesProvider for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn autocomplete(&self, input: &str) -> Result<Vec<PlaceSuggestion>, Error> {
        let data: Response<Vec<PlaceSuggestion>> = self
            .get(
                "place/autocomplete",
                &[
                    ("input", input.into()),
                    ("types", "geocode".into()),
                    ("components", format!("country:{}", self.config.country)),
                    ("language", self.config.language.clone()),
                ],
            )
            .await?;

        match (data.status.as_str(), data.predictions) {
            ("ZERO_RESULTS", _) => Ok(vec![]),
            ("OK", Some(predictions)) => Ok(predictions),
            (status, _) => Err(upstream_status_error(status, data.error_message.as_deref())),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn place_details(&self, place_id: &str) -> Result<Option<Place>, Error> {
        let data: Response<PlaceDetails> = self
            .get(
                "place/details",
                &[
                    ("place_id", place_id.into()),
                    ("fields", "name,formatted_address,geometry".into()),
                    ("language", self.config.language.clone()),
                ],
            )
            .await?;

        if data.status != "OK" {
            tracing::debug!("place details returned {}", data.status);
            return Ok(None);
        }

        let place = data.result.and_then(|details| {
            let geometry = details.geometry?;
            let label = details
                .formatted_address
                .or(details.name)
                .unwrap_or_else(|| DEFAULT_PLACE_LABEL.into());

            Some(Place {
                coordinates: geometry.location,
                label,
            })
        });

        Ok(place)
    }
}
