//! Google encoded polyline format.
//!
//! Each coordinate is stored as the signed difference from the previous one,
//! in 1e-5 degree units, zig-zag encoded and split into 5-bit groups. A group
//! is written as an ASCII byte offset by 63, with 0x20 set on every group but
//! the last of a value.

use crate::entities::Coordinates;
use crate::error::{malformed_polyline_error, Error};

const PRECISION: f64 = 1e5;
const CHUNK_MASK: i64 = 0x1f;
const CONTINUATION_BIT: i64 = 0x20;
const ASCII_OFFSET: u8 = 63;
// Seven 5-bit groups cover any 32-bit delta.
const MAX_SHIFT: u32 = 30;

/// Decodes `encoded` into its coordinates, in order.
///
/// Truncated input, bytes outside the encoding alphabet and over-long values
/// are rejected with a malformed polyline error.
pub fn decode(encoded: &str) -> Result<Vec<Coordinates>, Error> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut path = Vec::new();

    while index < bytes.len() {
        lat += next_value(bytes, &mut index)?;
        lng += next_value(bytes, &mut index)?;

        path.push(Coordinates::new(
            lat as f64 / PRECISION,
            lng as f64 / PRECISION,
        ));
    }

    Ok(path)
}

/// Encodes `path`, rounding each coordinate to 1e-5 degrees.
pub fn encode(path: &[Coordinates]) -> String {
    let mut encoded = String::new();
    let mut previous_lat: i64 = 0;
    let mut previous_lng: i64 = 0;

    for coordinates in path {
        let lat = (coordinates.lat * PRECISION).round() as i64;
        let lng = (coordinates.lng * PRECISION).round() as i64;

        push_value(lat - previous_lat, &mut encoded);
        push_value(lng - previous_lng, &mut encoded);

        previous_lat = lat;
        previous_lng = lng;
    }

    encoded
}

fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, Error> {
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let byte = *bytes.get(*index).ok_or_else(malformed_polyline_error)?;
        *index += 1;

        if !(ASCII_OFFSET..=126).contains(&byte) || shift > MAX_SHIFT {
            return Err(malformed_polyline_error());
        }

        let chunk = (byte - ASCII_OFFSET) as i64;
        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    if result & 1 == 1 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}

fn push_value(value: i64, encoded: &mut String) {
    let mut value = if value < 0 { !(value << 1) } else { value << 1 };

    while value >= CONTINUATION_BIT {
        let chunk = (value & CHUNK_MASK) | CONTINUATION_BIT;
        encoded.push(char::from(chunk as u8 + ASCII_OFFSET));
        value >>= 5;
    }

    encoded.push(char::from(value as u8 + ASCII_OFFSET));
}
