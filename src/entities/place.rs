use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

/// Label used when the provider returns neither an address nor a name.
pub const DEFAULT_PLACE_LABEL: &str = "Destinație";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub place_id: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub coordinates: Coordinates,
    pub label: String,
}
