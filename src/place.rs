//! Places and coordinates loaded from the static reference data.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::slug::to_slug;

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Builds coordinates, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, PlaceError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(PlaceError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(PlaceError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// (lat, lng) tuple, the order used by [`crate::polyline::Polyline`].
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaceError {
    InvalidLatitude(f64),
    InvalidLongitude(f64),
    EmptyName,
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLatitude(value) => write!(f, "latitude {} is outside [-90, 90]", value),
            Self::InvalidLongitude(value) => {
                write!(f, "longitude {} is outside [-180, 180]", value)
            }
            Self::EmptyName => write!(f, "place name is empty"),
        }
    }
}

impl std::error::Error for PlaceError {}

/// A municipality or taxi city.
///
/// `identifier` is unique within its collection. `slug` is what appears in
/// URLs and may be shared by same-named villages in different districts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub identifier: String,
    pub slug: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub district: String,
    pub region: String,
}

impl Place {
    pub fn new(
        name: impl Into<String>,
        district: impl Into<String>,
        region: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        let name = name.into();
        let slug = to_slug(&name);
        Self {
            identifier: slug.clone(),
            slug,
            name,
            coordinates,
            district: district.into(),
            region: region.into(),
        }
    }

    /// Overrides the directory key, e.g. `horna-lehota-brezno`.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }
}

/// Raw place record as stored in the reference JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    pub name: String,
    pub district: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl TryFrom<PlaceRecord> for Place {
    type Error = PlaceError;

    fn try_from(record: PlaceRecord) -> Result<Self, Self::Error> {
        if record.name.trim().is_empty() {
            return Err(PlaceError::EmptyName);
        }
        let coordinates = Coordinates::new(record.latitude, record.longitude)?;
        let slug = record.slug.unwrap_or_else(|| to_slug(&record.name));
        let identifier = record.identifier.unwrap_or_else(|| slug.clone());

        Ok(Self {
            identifier,
            slug,
            name: record.name,
            coordinates,
            district: record.district,
            region: record.region,
        })
    }
}
