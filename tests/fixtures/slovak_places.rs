//! Real Slovak towns and villages for test fixtures.
//!
//! Coordinates are town centres from OpenStreetMap, rounded to four decimals.

#![allow(dead_code)]

use taxi_geo::directory::Directory;
use taxi_geo::distance_table::{DistanceRecord, DistanceTable};
use taxi_geo::place::{Coordinates, Place};

/// A named place with its administrative parents.
#[derive(Debug, Clone)]
pub struct Town {
    pub identifier: Option<&'static str>,
    pub name: &'static str,
    pub district: &'static str,
    pub region: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Town {
    pub const fn new(
        name: &'static str,
        district: &'static str,
        region: &'static str,
        lat: f64,
        lng: f64,
    ) -> Self {
        Self {
            identifier: None,
            name,
            district,
            region,
            lat,
            lng,
        }
    }

    pub const fn keyed(mut self, identifier: &'static str) -> Self {
        self.identifier = Some(identifier);
        self
    }

    pub fn place(&self) -> Place {
        let coordinates = Coordinates::new(self.lat, self.lng).expect("fixture coordinates");
        let place = Place::new(self.name, self.district, self.region, coordinates);
        match self.identifier {
            Some(identifier) => place.with_identifier(identifier),
            None => place,
        }
    }
}

// ============================================================================
// Towns with taxi services
// ============================================================================

pub const TAXI_CITIES: &[Town] = &[
    Town::new("Nové Mesto nad Váhom", "Nové Mesto nad Váhom", "Trenčiansky kraj", 48.7576, 17.8303),
    Town::new("Trenčín", "Trenčín", "Trenčiansky kraj", 48.8945, 18.0444),
    Town::new("Piešťany", "Piešťany", "Trnavský kraj", 48.5918, 17.8271),
    Town::new("Stará Turá", "Nové Mesto nad Váhom", "Trenčiansky kraj", 48.7772, 17.6960),
    Town::new("Myjava", "Myjava", "Trenčiansky kraj", 48.7590, 17.5680),
    Town::new("Žilina", "Žilina", "Žilinský kraj", 49.2231, 18.7394),
    Town::new("Banská Bystrica", "Banská Bystrica", "Banskobystrický kraj", 48.7363, 19.1462),
    Town::new("Brezno", "Brezno", "Banskobystrický kraj", 48.8060, 19.6383),
    Town::new("Košice", "Košice I", "Košický kraj", 48.7164, 21.2611),
    Town::new("Bratislava", "Bratislava I", "Bratislavský kraj", 48.1486, 17.1077),
];

// ============================================================================
// Municipalities without their own taxi page
// ============================================================================

/// File order matters: the first Višňové and Horná Lehota win name lookups.
pub const MUNICIPALITIES: &[Town] = &[
    Town::new("Višňové", "Nové Mesto nad Váhom", "Trenčiansky kraj", 48.7230, 17.8689),
    Town::new("Čachtice", "Nové Mesto nad Váhom", "Trenčiansky kraj", 48.7125, 17.7870),
    Town::new("Bošáca", "Nové Mesto nad Váhom", "Trenčiansky kraj", 48.8276, 17.8444),
    Town::new("Višňové", "Žilina", "Žilinský kraj", 49.1469, 18.7622).keyed("visnove-zilina"),
    // Source data carries the region qualifier twice for this one
    Town::new("Horná Lehota", "Brezno", "Banskobystrický kraj kraj", 48.8322, 19.5406)
        .keyed("horna-lehota-brezno"),
    Town::new("Horná Lehota", "Dolný Kubín", "Žilinský kraj", 49.2240, 19.3500)
        .keyed("horna-lehota-dolny-kubin"),
    Town::new("Nové Mesto nad Váhom", "Nové Mesto nad Váhom", "Trenčiansky kraj", 48.7576, 17.8303),
];

pub fn taxi_cities() -> Vec<Place> {
    TAXI_CITIES.iter().map(Town::place).collect()
}

pub fn municipalities() -> Vec<Place> {
    MUNICIPALITIES.iter().map(Town::place).collect()
}

pub fn directory() -> Directory {
    Directory::new(municipalities(), taxi_cities())
}

pub fn find_city(slug: &str) -> Place {
    taxi_cities()
        .into_iter()
        .find(|place| place.slug == slug)
        .unwrap_or_else(|| panic!("no fixture city {}", slug))
}

pub fn find_municipality(identifier: &str) -> Place {
    municipalities()
        .into_iter()
        .find(|place| place.identifier == identifier)
        .unwrap_or_else(|| panic!("no fixture municipality {}", identifier))
}

fn record(origin: &str, destination: &str, air: f64, road: f64, minutes: u32) -> DistanceRecord {
    DistanceRecord {
        origin_slug: origin.to_string(),
        destination_slug: destination.to_string(),
        straight_line_distance_km: air,
        road_distance_km: road,
        duration_minutes: minutes,
    }
}

/// Road distances from Višňové (NMnV) to the four closest taxi towns.
///
/// Myjava is deliberately missing, so it falls back to straight line.
pub fn precomputed_records() -> Vec<DistanceRecord> {
    vec![
        record("visnove", "nove-mesto-nad-vahom", 4.8, 6.9, 9),
        record("visnove", "stara-tura", 14.0, 18.2, 22),
        record("visnove", "piestany", 14.9, 19.5, 21),
        record("visnove", "trencin", 23.0, 27.4, 29),
    ]
}

pub fn precomputed_table() -> DistanceTable {
    DistanceTable::from_records(precomputed_records())
}

pub const DIRECTORY_JSON: &str = r#"{
  "municipalities": [
    {"name": "Višňové", "district": "Nové Mesto nad Váhom", "region": "Trenčiansky kraj",
     "latitude": 48.7230, "longitude": 17.8689},
    {"identifier": "visnove-zilina", "slug": "visnove", "name": "Višňové",
     "district": "Žilina", "region": "Žilinský kraj", "latitude": 49.1469, "longitude": 18.7622},
    {"identifier": "horna-lehota-brezno", "name": "Horná Lehota", "district": "Brezno",
     "region": "Banskobystrický kraj kraj", "latitude": 48.8322, "longitude": 19.5406}
  ],
  "cities": [
    {"name": "Nové Mesto nad Váhom", "district": "Nové Mesto nad Váhom", "region": "Trenčiansky kraj",
     "latitude": 48.7576, "longitude": 17.8303},
    {"name": "Trenčín", "district": "Trenčín", "region": "Trenčiansky kraj",
     "latitude": 48.8945, "longitude": 18.0444}
  ]
}"#;

pub const PRECOMPUTED_JSON: &str = r#"{
  "lastUpdated": "2025-11-02T10:00:00.000Z",
  "distances": [
    {"municipalitySlug": "visnove", "citySlug": "nove-mesto-nad-vahom",
     "airDistance": 4.8, "roadDistance": 6.9, "duration": 9},
    {"municipalitySlug": "visnove", "citySlug": "trencin",
     "airDistance": 23.0, "roadDistance": 27.4, "duration": 29},
    {"municipalitySlug": "horna-lehota-brezno", "citySlug": "brezno",
     "airDistance": 7.5, "roadDistance": 6.1, "duration": 8}
  ]
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_in_slovakia() {
        for town in TAXI_CITIES.iter().chain(MUNICIPALITIES) {
            assert!(town.lat > 47.7 && town.lat < 49.7, "{} lat out of range", town.name);
            assert!(town.lng > 16.8 && town.lng < 22.6, "{} lng out of range", town.name);
        }
    }
}
