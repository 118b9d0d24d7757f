use serde::{Deserialize, Serialize};

/// WGS84 position in degrees, serialized in the `{lat, lng}` shape the map
/// providers use.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Short "lat, lng" label used when no address is known.
    pub fn label(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

impl From<Coordinates> for String {
    fn from(coordinates: Coordinates) -> Self {
        format!("{},{}", coordinates.lat, coordinates.lng)
    }
}

#[test]
fn coordinates_format_test() {
    let coordinates = Coordinates::new(47.446463006875895, 26.901535213917253);

    assert_eq!(coordinates.label(), "47.4465, 26.9015");

    let query: String = Coordinates::new(38.5, -120.2).into();
    assert_eq!(query, "38.5,-120.2");
}
