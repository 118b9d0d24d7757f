//! Fixtures shared by the unit tests.

use async_trait::async_trait;
use axum::{
    extract::{Extension, Query},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::api::{DriverAPI, MemberAPI, PlaceAPI, RouteAPI, API};
use crate::auth::{authorizor, User};
use crate::config::DEFAULT_TAXI_LOCATION;
use crate::entities::{
    Coordinates, DriverState, DriverStatus, Member, Place, PlaceSuggestion, Quote, Role, Route,
};
use crate::error::{
    database_error, invalid_input_error, not_found_error, unauthorized_error, upstream_error,
    Error,
};
use crate::external::google_maps::{DirectionsRoute, Leg, OverviewPolyline, TextValue};
use crate::external::{
    Directions, DirectionsProvider, GeocodingProvider, GoogleMaps, GoogleMapsConfig,
    PlacesProvider,
};
use crate::routing;

pub const THREE_POINTS: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const FAKE_HOUR: u32 = 14;

pub async fn spawn_router(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    let server = axum::Server::from_tcp(listener)
        .unwrap()
        .serve(router.into_make_service());
    tokio::spawn(server);

    addr
}

pub fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> &'a str {
    params.get(key).map(String::as_str).unwrap_or_default()
}

#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<(String, HashMap<String, String>)>>>);

impl Recorder {
    fn record(&self, uri: &Uri, params: HashMap<String, String>) {
        self.0.lock().unwrap().push((uri.path().to_string(), params));
    }

    pub fn last(&self) -> (String, HashMap<String, String>) {
        self.0.lock().unwrap().last().cloned().unwrap()
    }
}

/// Google Maps client pointed at an in-process fake of the four endpoints.
pub async fn fake_google_maps(timeout_secs: u64) -> (GoogleMaps, Recorder) {
    let recorder = Recorder::default();

    let router = Router::new()
        .route("/maps/api/directions/json", get(fake_directions))
        .route("/maps/api/geocode/json", get(fake_geocode))
        .route("/maps/api/place/autocomplete/json", get(fake_autocomplete))
        .route("/maps/api/place/details/json", get(fake_place_details))
        .layer(Extension(recorder.clone()));

    let addr = spawn_router(router).await;

    let maps = GoogleMaps::new(GoogleMapsConfig {
        scheme: "http".into(),
        api_base: addr.to_string(),
        api_key: "test-key".into(),
        timeout_secs,
        ..GoogleMapsConfig::default()
    })
    .unwrap();

    (maps, recorder)
}

async fn fake_directions(
    Extension(recorder): Extension<Recorder>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let origin = param(&params, "origin").to_string();
    recorder.record(&uri, params);

    match origin.as_str() {
        "0,0" => Json(json!({ "status": "ZERO_RESULTS", "routes": [] })).into_response(),
        "4,4" => (StatusCode::BAD_REQUEST, "bad request").into_response(),
        "5,5" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "9,9" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "status": "OK", "routes": [] })).into_response()
        }
        _ => Json(directions_body()).into_response(),
    }
}

fn directions_body() -> Value {
    json!({
        "status": "OK",
        "routes": [{
            "legs": [{
                "distance": { "text": "10.0 km", "value": 10000 },
                "duration": { "text": "20 mins", "value": 1200 },
                "duration_in_traffic": { "text": "25 mins", "value": 1500 }
            }],
            "overview_polyline": { "points": THREE_POINTS }
        }]
    })
}

async fn fake_geocode(
    Extension(recorder): Extension<Recorder>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let latlng = param(&params, "latlng").to_string();
    recorder.record(&uri, params);

    match latlng.as_str() {
        "0,0" => Json(json!({ "status": "ZERO_RESULTS", "results": [] })),
        _ => Json(json!({
            "status": "OK",
            "results": [
                { "formatted_address": "Strada Lăpușneanu 7, Iași" },
                { "formatted_address": "Iași" }
            ]
        })),
    }
}

async fn fake_autocomplete(
    Extension(recorder): Extension<Recorder>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let input = param(&params, "input").to_string();
    recorder.record(&uri, params);

    match input.as_str() {
        "nimic" => Json(json!({ "status": "ZERO_RESULTS", "predictions": [] })),
        "denied" => Json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "predictions": []
        })),
        _ => Json(json!({
            "status": "OK",
            "predictions": [
                { "place_id": "palas-1", "description": "Palas Mall, Iași", "types": ["establishment"] },
                { "place_id": "palas-2", "description": "Strada Palas, Iași" }
            ]
        })),
    }
}

async fn fake_place_details(
    Extension(recorder): Extension<Recorder>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let place_id = param(&params, "place_id").to_string();
    recorder.record(&uri, params);

    let location = json!({ "location": { "lat": 47.156, "lng": 27.587 } });

    match place_id.as_str() {
        "missing" => Json(json!({ "status": "NOT_FOUND" })),
        "no-geometry" => Json(json!({ "status": "OK", "result": { "name": "Nowhere" } })),
        "name-only" => Json(json!({
            "status": "OK",
            "result": { "name": "Gara Iași", "geometry": location }
        })),
        "unnamed" => Json(json!({ "status": "OK", "result": { "geometry": location } })),
        _ => Json(json!({
            "status": "OK",
            "result": {
                "name": "Palas Mall",
                "formatted_address": "Palas Mall, Strada Palas 7A, Iași",
                "geometry": location
            }
        })),
    }
}

pub fn ok_directions() -> Directions {
    Directions {
        status: "OK".into(),
        error_message: None,
        routes: vec![DirectionsRoute {
            legs: vec![Leg {
                distance: Some(TextValue {
                    text: "10.0 km".into(),
                    value: 10000.0,
                }),
                duration: Some(TextValue {
                    text: "20 mins".into(),
                    value: 1200.0,
                }),
                duration_in_traffic: Some(TextValue {
                    text: "25 mins".into(),
                    value: 1500.0,
                }),
            }],
            overview_polyline: Some(OverviewPolyline {
                points: THREE_POINTS.into(),
            }),
        }],
    }
}

/// In-memory map provider with canned answers.
pub struct FakeMaps {
    pub directions: Option<Directions>,
    pub address: Option<String>,
    pub suggestions: Vec<PlaceSuggestion>,
    pub place: Option<Place>,
    pub requests: Mutex<Vec<(Coordinates, Coordinates)>>,
    pub place_ids: Mutex<Vec<String>>,
}

impl Default for FakeMaps {
    fn default() -> Self {
        Self {
            directions: Some(ok_directions()),
            address: Some("Strada Lăpușneanu 7, Iași".into()),
            suggestions: vec![PlaceSuggestion {
                place_id: "palas-1".into(),
                description: "Palas Mall, Iași".into(),
            }],
            place: Some(Place {
                coordinates: Coordinates::new(47.156, 27.587),
                label: "Palas Mall".into(),
            }),
            requests: Mutex::new(vec![]),
            place_ids: Mutex::new(vec![]),
        }
    }
}

#[async_trait]
impl DirectionsProvider for FakeMaps {
    async fn find_directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Directions, Error> {
        self.requests.lock().unwrap().push((origin, destination));
        self.directions.clone().ok_or_else(upstream_error)
    }
}

#[async_trait]
impl GeocodingProvider for FakeMaps {
    async fn reverse_geocode(&self, _: Coordinates) -> Result<Option<String>, Error> {
        self.address
            .clone()
            .map(Some)
            .ok_or_else(upstream_error)
    }
}

#[async_trait]
impl PlacesProvider for FakeMaps {
    async fn autocomplete(&self, input: &str) -> Result<Vec<PlaceSuggestion>, Error> {
        match input {
            "denied" => Err(upstream_error()),
            "nimic" => Ok(vec![]),
            _ => Ok(self.suggestions.clone()),
        }
    }

    async fn place_details(&self, place_id: &str) -> Result<Option<Place>, Error> {
        self.place_ids.lock().unwrap().push(place_id.to_string());
        Ok(self.place.clone())
    }
}

/// In-memory stand-in for the engine, authorizing with the real policy.
pub struct FakeApi {
    pub maps: FakeMaps,
    pub members: Vec<Member>,
    pub state: Mutex<DriverState>,
    pub fail_database: bool,
    pub authorizor: oso::Oso,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            maps: FakeMaps::default(),
            members: vec![
                Member {
                    id: uuid::Uuid::new_v4(),
                    phone_number: "0755000111".into(),
                    name: "Ana".into(),
                    role: Role::Passenger,
                },
                Member {
                    id: uuid::Uuid::new_v4(),
                    phone_number: "0755123456".into(),
                    name: "Bro".into(),
                    role: Role::Admin,
                },
            ],
            state: Mutex::new(DriverState::default()),
            fail_database: false,
            authorizor: authorizor::new().unwrap(),
        }
    }
}

impl FakeApi {
    fn modify<F>(&self, user: User, change: F) -> Result<DriverState, Error>
    where
        F: FnOnce(&mut DriverState) -> Result<(), Error>,
    {
        let mut guard = self.state.lock().unwrap();
        let mut state = guard.clone();

        if !self.authorizor.is_allowed(user, "update", state.clone())? {
            return Err(unauthorized_error());
        }

        change(&mut state)?;
        *guard = state.clone();

        Ok(state)
    }
}

#[async_trait]
impl MemberAPI for FakeApi {
    async fn find_member_by_phone_number(&self, phone_number: &str) -> Result<Member, Error> {
        if self.fail_database {
            return Err(database_error("connection refused"));
        }

        let phone_number = phone_number.trim();
        if phone_number.is_empty() {
            return Err(invalid_input_error());
        }

        self.members
            .iter()
            .find(|member| member.phone_number == phone_number)
            .cloned()
            .ok_or_else(|| not_found_error("User not found"))
    }
}

#[async_trait]
impl DriverAPI for FakeApi {
    async fn find_driver_state(&self, user: User) -> Result<DriverState, Error> {
        let state = self.state.lock().unwrap().clone();

        if !self.authorizor.is_allowed(user, "read", state.clone())? {
            return Err(unauthorized_error());
        }

        Ok(state)
    }

    async fn update_driver_status(
        &self,
        user: User,
        status: DriverStatus,
    ) -> Result<DriverState, Error> {
        self.modify(user, |state| {
            state.set_status(status);
            Ok(())
        })
    }

    async fn update_tariffs(
        &self,
        user: User,
        day_rate: &str,
        night_rate: &str,
    ) -> Result<DriverState, Error> {
        self.modify(user, |state| state.update_tariffs(day_rate, night_rate))
    }

    async fn update_driver_phone_number(
        &self,
        user: User,
        phone_number: &str,
    ) -> Result<DriverState, Error> {
        self.modify(user, |state| state.update_phone_number(phone_number))
    }
}

#[async_trait]
impl RouteAPI for FakeApi {
    async fn compute_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Option<Route>, Error> {
        Ok(routing::compute_route(&self.maps, origin, destination).await)
    }

    async fn find_pickup_route(&self, passenger: Coordinates) -> Result<Option<Route>, Error> {
        Ok(routing::compute_route(&self.maps, DEFAULT_TAXI_LOCATION, passenger).await)
    }

    async fn create_quote(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Option<Quote>, Error> {
        let tariffs = self.state.lock().unwrap().tariffs;

        Ok(routing::quote(&self.maps, origin, destination, &tariffs, FAKE_HOUR).await)
    }
}

#[async_trait]
impl PlaceAPI for FakeApi {
    async fn list_place_suggestions(&self, input: &str) -> Result<Vec<PlaceSuggestion>, Error> {
        self.maps.autocomplete(input).await
    }

    async fn find_place(&self, place_id: &str) -> Result<Option<Place>, Error> {
        self.maps.place_details(place_id).await
    }

    async fn describe_location(&self, coordinates: Coordinates) -> Result<String, Error> {
        Ok(routing::describe_location(&self.maps, coordinates).await)
    }
}

impl API for FakeApi {}
