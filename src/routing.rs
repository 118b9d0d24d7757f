//! Route, fare and address lookups on top of the map providers.
//!
//! Provider failures never reach the caller here: an unavailable or malformed
//! directions answer becomes `None` and an unknown address falls back to the
//! coordinates themselves. Every failure is logged and final for that lookup.

use crate::entities::{Coordinates, Quote, Route, TariffTable};
use crate::error::{upstream_error, Error};
use crate::external::{Directions, DirectionsProvider, GeocodingProvider};
use crate::polyline;

const METERS_PER_KM: f64 = 1000.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Route from `origin` to `destination` departing now, or `None` when the
/// provider has no usable answer.
#[tracing::instrument(skip(directions))]
pub async fn compute_route<D>(
    directions: &D,
    origin: Coordinates,
    destination: Coordinates,
) -> Option<Route>
where
    D: DirectionsProvider + ?Sized,
{
    let response = match directions.find_directions(origin, destination).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!("directions request failed: {}", err);
            return None;
        }
    };

    match route_from_directions(response) {
        Ok(route) => route,
        Err(err) => {
            tracing::warn!("malformed directions response: {}", err);
            None
        }
    }
}

/// Interprets a directions response. `Ok(None)` means the provider found no
/// route; an error means the response is missing something it promised.
pub fn route_from_directions(response: Directions) -> Result<Option<Route>, Error> {
    if response.status != "OK" {
        tracing::warn!(
            "directions returned {}: {}",
            response.status,
            response.error_message.as_deref().unwrap_or_default()
        );
        return Ok(None);
    }

    let route = match response.routes.into_iter().next() {
        Some(route) => route,
        None => return Ok(None),
    };

    let leg = route.legs.into_iter().next().ok_or_else(upstream_error)?;
    let distance = leg.distance.ok_or_else(upstream_error)?;
    let duration = leg
        .duration_in_traffic
        .or(leg.duration)
        .ok_or_else(upstream_error)?;

    let points = route.overview_polyline.ok_or_else(upstream_error)?.points;
    let path = polyline::decode(&points)?;

    if path.is_empty() || distance.value < 0.0 || duration.value < 0.0 {
        return Err(upstream_error());
    }

    Ok(Some(Route {
        distance_km: distance.value / METERS_PER_KM,
        duration_minutes: duration.value / SECONDS_PER_MINUTE,
        path,
        traffic_description: duration.text,
    }))
}

/// Human readable address of `coordinates`, falling back to "lat, lng".
#[tracing::instrument(skip(geocoding))]
pub async fn describe_location<G>(geocoding: &G, coordinates: Coordinates) -> String
where
    G: GeocodingProvider + ?Sized,
{
    match geocoding.reverse_geocode(coordinates).await {
        Ok(Some(address)) => address,
        Ok(None) => coordinates.label(),
        Err(err) => {
            tracing::warn!("reverse geocoding failed: {}", err);
            coordinates.label()
        }
    }
}

/// Prices the passenger→destination route with the tariff for `hour`. The
/// route and the destination address are looked up concurrently.
#[tracing::instrument(skip(maps, tariffs))]
pub async fn quote<M>(
    maps: &M,
    origin: Coordinates,
    destination: Coordinates,
    tariffs: &TariffTable,
    hour: u32,
) -> Option<Quote>
where
    M: DirectionsProvider + GeocodingProvider + ?Sized,
{
    let (route, destination_address) = futures::join!(
        compute_route(maps, origin, destination),
        describe_location(maps, destination)
    );

    Some(Quote::new(route?, destination_address, tariffs, hour))
}
