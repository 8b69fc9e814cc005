//! Route geometry.
//!
//! Routing services send geometries in the compact encoded-polyline format
//! (precision 5). They are decoded once at the HTTP boundary; everything
//! else works with the decoded points.

use serde::{Deserialize, Serialize};

use crate::place::Coordinates;

/// A route geometry as decoded (latitude, longitude) points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Two-point line, used for straight-line estimates.
    pub fn straight(from: Coordinates, to: Coordinates) -> Self {
        Self::new(vec![from.as_tuple(), to.as_tuple()])
    }

    /// Decodes an encoded polyline with 1e5 precision.
    ///
    /// Returns `None` on truncated input or characters outside the
    /// encoding alphabet.
    pub fn decode(encoded: &str) -> Option<Self> {
        let bytes = encoded.as_bytes();
        let mut index = 0;
        let mut lat: i64 = 0;
        let mut lng: i64 = 0;
        let mut points = Vec::new();

        while index < bytes.len() {
            lat += decode_value(bytes, &mut index)?;
            lng += decode_value(bytes, &mut index)?;
            points.push((lat as f64 / 1e5, lng as f64 / 1e5));
        }

        Some(Self { points })
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn decode_value(bytes: &[u8], index: &mut usize) -> Option<i64> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(*index)?;
        *index += 1;
        if !(63..=126).contains(&byte) || shift > 60 {
            return None;
        }
        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }

    Some(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}
