use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::entities::Coordinates;
use crate::error::{env_var_error, Error};
use crate::external::GoogleMapsConfig;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Where the single taxi waits when no other position is configured.
pub const DEFAULT_TAXI_LOCATION: Coordinates = Coordinates {
    lat: 47.446463006875895,
    lng: 26.901535213917253,
};

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub database_max_connections: u32,
    pub listen_addr: SocketAddr,
    pub google_maps: GoogleMapsConfig,
    pub taxi_location: Coordinates,
    pub admin_token: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| env_var_error(key))
        };
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let maps_defaults = GoogleMapsConfig::default();

        let google_maps = GoogleMapsConfig {
            scheme: or_default("GOOGLE_MAPS_API_SCHEME", &maps_defaults.scheme),
            api_base: or_default("GOOGLE_MAPS_API_BASE", &maps_defaults.api_base),
            api_key: required("GOOGLE_MAPS_API_KEY")?,
            language: or_default("GOOGLE_MAPS_LANGUAGE", &maps_defaults.language),
            country: or_default("GOOGLE_MAPS_COUNTRY", &maps_defaults.country),
            timeout_secs: parsed(&lookup, "HTTP_TIMEOUT_SECS", maps_defaults.timeout_secs)?,
        };

        let taxi_location = Coordinates::new(
            parsed(&lookup, "TAXI_LATITUDE", DEFAULT_TAXI_LOCATION.lat)?,
            parsed(&lookup, "TAXI_LONGITUDE", DEFAULT_TAXI_LOCATION.lng)?,
        );

        let listen_addr = or_default("LISTEN_ADDR", DEFAULT_LISTEN_ADDR)
            .parse()
            .map_err(|_| env_var_error("LISTEN_ADDR"))?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            database_max_connections: parsed(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
            listen_addr,
            google_maps,
            taxi_location,
            admin_token: lookup("ADMIN_TOKEN").filter(|token| !token.is_empty()),
        })
    }
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> Result<T, Error>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| env_var_error(key)),
        None => Ok(default),
    }
}
