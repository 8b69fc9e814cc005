//! Precomputed road distances between municipalities and taxi cities.
//!
//! The table is produced offline and loaded read-only at startup. It is
//! directional: `(a, b)` and `(b, a)` are separate entries and may differ.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

/// Ratio above which a road distance is considered a suspicious detour.
const DETOUR_RATIO: f64 = 3.0;

/// Detour check is skipped for very short hops.
const DETOUR_MIN_STRAIGHT_KM: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DistanceRecord {
    #[serde(rename = "municipalitySlug")]
    pub origin_slug: String,
    #[serde(rename = "citySlug")]
    pub destination_slug: String,
    #[serde(rename = "airDistance")]
    pub straight_line_distance_km: f64,
    #[serde(rename = "roadDistance")]
    pub road_distance_km: f64,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
}

#[derive(Debug, Deserialize)]
struct DistanceDocument {
    distances: Vec<DistanceRecord>,
}

/// Data-quality finding for a single record. Never an error at request time.
#[derive(Debug, Clone, PartialEq)]
pub enum DataIntegrityWarning {
    RoadShorterThanStraightLine {
        origin: String,
        destination: String,
        road_km: f64,
        straight_line_km: f64,
    },
    ExtremeDetour {
        origin: String,
        destination: String,
        road_km: f64,
        straight_line_km: f64,
    },
    ZeroDistance {
        origin: String,
        destination: String,
    },
    ZeroDuration {
        origin: String,
        destination: String,
        road_km: f64,
    },
}

impl fmt::Display for DataIntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoadShorterThanStraightLine {
                origin,
                destination,
                road_km,
                straight_line_km,
            } => write!(
                f,
                "{} -> {}: road {} km shorter than straight line {} km",
                origin, destination, road_km, straight_line_km
            ),
            Self::ExtremeDetour {
                origin,
                destination,
                road_km,
                straight_line_km,
            } => write!(
                f,
                "{} -> {}: road {} km is over {}x straight line {} km",
                origin, destination, road_km, DETOUR_RATIO, straight_line_km
            ),
            Self::ZeroDistance {
                origin,
                destination,
            } => write!(f, "{} -> {}: zero distance", origin, destination),
            Self::ZeroDuration {
                origin,
                destination,
                road_km,
            } => write!(
                f,
                "{} -> {}: zero duration for {} km",
                origin, destination, road_km
            ),
        }
    }
}

#[derive(Debug)]
pub enum DataLoadError {
    Io(io::Error),
    Json(serde_json::Error),
    InvalidPlace {
        collection: &'static str,
        index: usize,
        reason: String,
    },
}

impl fmt::Display for DataLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read reference data: {}", err),
            Self::Json(err) => write!(f, "invalid reference data: {}", err),
            Self::InvalidPlace {
                collection,
                index,
                reason,
            } => write!(f, "invalid place {}[{}]: {}", collection, index, reason),
        }
    }
}

impl std::error::Error for DataLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::InvalidPlace { .. } => None,
        }
    }
}

impl From<io::Error> for DataLoadError {
    fn from(err: io::Error) -> Self {
        DataLoadError::Io(err)
    }
}

impl From<serde_json::Error> for DataLoadError {
    fn from(err: serde_json::Error) -> Self {
        DataLoadError::Json(err)
    }
}

/// Read-only `(origin, destination) -> DistanceRecord` lookup.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    // origin -> destination -> record
    records: HashMap<String, HashMap<String, DistanceRecord>>,
    len: usize,
}

impl DistanceTable {
    /// Builds a table; on duplicate keys the first record wins.
    pub fn from_records(records: impl IntoIterator<Item = DistanceRecord>) -> Self {
        let mut map: HashMap<String, HashMap<String, DistanceRecord>> = HashMap::new();
        let mut len = 0usize;
        let mut duplicates = 0usize;

        for record in records {
            let destinations = map.entry(record.origin_slug.clone()).or_default();
            if destinations.contains_key(&record.destination_slug) {
                duplicates += 1;
                warn!(
                    origin = %record.origin_slug,
                    destination = %record.destination_slug,
                    "duplicate precomputed distance ignored"
                );
                continue;
            }
            destinations.insert(record.destination_slug.clone(), record);
            len += 1;
        }

        info!(records = len, duplicates, "precomputed distance table loaded");
        Self { records: map, len }
    }

    /// Parses the `{ "distances": [...] }` document.
    pub fn from_json_str(json: &str) -> Result<Self, DataLoadError> {
        let document: DistanceDocument = serde_json::from_str(json)?;
        Ok(Self::from_records(document.distances))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, DataLoadError> {
        let document: DistanceDocument = serde_json::from_reader(reader)?;
        Ok(Self::from_records(document.distances))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Exact, directional lookup. `None` is the common case.
    pub fn lookup(&self, origin_slug: &str, destination_slug: &str) -> Option<&DistanceRecord> {
        self.records.get(origin_slug)?.get(destination_slug)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn records(&self) -> impl Iterator<Item = &DistanceRecord> {
        self.records.values().flat_map(|destinations| destinations.values())
    }

    /// Flags suspicious records without touching them.
    ///
    /// Findings are sorted by origin then destination and logged at warn.
    pub fn audit(&self) -> Vec<DataIntegrityWarning> {
        let mut records: Vec<&DistanceRecord> = self.records().collect();
        records.sort_by(|a, b| {
            a.origin_slug
                .cmp(&b.origin_slug)
                .then_with(|| a.destination_slug.cmp(&b.destination_slug))
        });

        let warnings: Vec<DataIntegrityWarning> =
            records.into_iter().filter_map(audit_record).collect();

        for warning in &warnings {
            warn!(%warning, "precomputed distance failed audit");
        }
        warnings
    }
}

fn audit_record(record: &DistanceRecord) -> Option<DataIntegrityWarning> {
    if record.origin_slug == record.destination_slug {
        return None;
    }

    let origin = record.origin_slug.clone();
    let destination = record.destination_slug.clone();
    let road_km = record.road_distance_km;
    let straight_line_km = record.straight_line_distance_km;

    if road_km < straight_line_km {
        Some(DataIntegrityWarning::RoadShorterThanStraightLine {
            origin,
            destination,
            road_km,
            straight_line_km,
        })
    } else if road_km > straight_line_km * DETOUR_RATIO && straight_line_km > DETOUR_MIN_STRAIGHT_KM
    {
        Some(DataIntegrityWarning::ExtremeDetour {
            origin,
            destination,
            road_km,
            straight_line_km,
        })
    } else if road_km == 0.0 || straight_line_km == 0.0 {
        Some(DataIntegrityWarning::ZeroDistance {
            origin,
            destination,
        })
    } else if record.duration_minutes == 0 {
        Some(DataIntegrityWarning::ZeroDuration {
            origin,
            destination,
            road_km,
        })
    } else {
        None
    }
}
