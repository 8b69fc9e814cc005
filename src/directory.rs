//! Static municipality and taxi-city directory.
//!
//! Loaded once from reference JSON and shared read-only. Municipalities keep
//! their file order, which decides ties between same-named villages.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use unicode_normalization::UnicodeNormalization;

use crate::distance_table::DataLoadError;
use crate::nearby::{RankedPlace, nearest_n};
use crate::place::{Place, PlaceRecord};
use crate::resolver::DistanceResolver;
use crate::slug::{district_slug, region_slug, to_slug};
use crate::traits::RoutingService;

/// Canonical `region / district / municipality` slugs of a municipality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MunicipalityHierarchy {
    pub region_slug: String,
    pub district_slug: String,
    pub municipality_slug: String,
}

impl MunicipalityHierarchy {
    pub fn for_place(place: &Place) -> Self {
        Self {
            region_slug: region_slug(&place.region),
            district_slug: district_slug(&place.district),
            municipality_slug: place.slug.clone(),
        }
    }

    /// `/taxi/{region}/{district}/{municipality}`
    pub fn canonical_path(&self) -> String {
        format!(
            "/taxi/{}/{}/{}",
            self.region_slug, self.district_slug, self.municipality_slug
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub name: String,
    pub slug: String,
    pub region: String,
    pub region_slug: String,
    pub municipality_count: usize,
}

#[derive(Debug, Deserialize)]
struct DirectoryDocument {
    #[serde(default)]
    municipalities: Vec<PlaceRecord>,
    #[serde(default)]
    cities: Vec<PlaceRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct Directory {
    municipalities: Vec<Place>,
    cities: Vec<Place>,
    municipality_index: HashMap<String, usize>,
    city_index: HashMap<String, usize>,
    districts: Vec<District>,
    /// region slug -> district slug -> position in `districts`
    district_index: HashMap<String, HashMap<String, usize>>,
    region_slugs: HashSet<String>,
}

impl Directory {
    pub fn new(municipalities: Vec<Place>, cities: Vec<Place>) -> Self {
        let municipality_index = first_index_by(&municipalities, |place| &place.identifier);
        let city_index = first_index_by(&cities, |place| &place.slug);
        let districts = collect_districts(&municipalities);

        let mut district_index: HashMap<String, HashMap<String, usize>> = HashMap::new();
        for (position, district) in districts.iter().enumerate() {
            district_index
                .entry(district.region_slug.clone())
                .or_default()
                .entry(district.slug.clone())
                .or_insert(position);
        }

        let region_slugs = municipalities
            .iter()
            .map(|place| region_slug(&place.region))
            .collect();

        Self {
            municipalities,
            cities,
            municipality_index,
            city_index,
            districts,
            district_index,
            region_slugs,
        }
    }

    /// Parses `{ "municipalities": [...], "cities": [...] }`.
    pub fn from_json_str(json: &str) -> Result<Self, DataLoadError> {
        Self::from_document(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, DataLoadError> {
        Self::from_document(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    fn from_document(document: DirectoryDocument) -> Result<Self, DataLoadError> {
        let municipalities = into_places(document.municipalities, "municipalities")?;
        let cities = into_places(document.cities, "cities")?;
        info!(
            municipalities = municipalities.len(),
            cities = cities.len(),
            "place directory loaded"
        );
        Ok(Self::new(municipalities, cities))
    }

    pub fn municipalities(&self) -> &[Place] {
        &self.municipalities
    }

    pub fn cities(&self) -> &[Place] {
        &self.cities
    }

    /// Municipality by directory key.
    pub fn municipality(&self, identifier: &str) -> Option<&Place> {
        self.municipality_index
            .get(identifier)
            .map(|&index| &self.municipalities[index])
    }

    /// Taxi city by slug.
    pub fn city(&self, slug: &str) -> Option<&Place> {
        self.city_index.get(slug).map(|&index| &self.cities[index])
    }

    /// Finds a municipality by key, slug, or display name.
    ///
    /// Exact key match first. Otherwise the first municipality in file order
    /// whose slugified name or slug equals the slugified input.
    pub fn find_municipality(&self, slug_or_name: &str) -> Option<&Place> {
        if let Some(place) = self.municipality(slug_or_name) {
            return Some(place);
        }

        let wanted = to_slug(slug_or_name);
        if wanted.is_empty() {
            return None;
        }
        self.municipalities
            .iter()
            .find(|place| to_slug(&place.name) == wanted || place.slug == wanted)
    }

    pub fn resolve_municipality_hierarchy(
        &self,
        slug_or_name: &str,
    ) -> Option<MunicipalityHierarchy> {
        self.find_municipality(slug_or_name)
            .map(MunicipalityHierarchy::for_place)
    }

    /// Districts derived from the municipality list, in Slovak name order.
    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    pub fn districts_in_region(&self, region_slug: &str) -> Vec<&District> {
        self.districts
            .iter()
            .filter(|district| district.region_slug == region_slug)
            .collect()
    }

    pub fn district(&self, region_slug: &str, district_slug: &str) -> Option<&District> {
        self.district_index
            .get(region_slug)
            .and_then(|districts| districts.get(district_slug))
            .map(|&position| &self.districts[position])
    }

    pub fn is_valid_region_slug(&self, slug: &str) -> bool {
        self.region_slugs.contains(slug)
    }

    /// Municipalities of one district, in Slovak name order.
    pub fn municipalities_in_district(&self, district: &District) -> Vec<&Place> {
        let mut places: Vec<&Place> = self
            .municipalities
            .iter()
            .filter(|place| place.district == district.name)
            .collect();
        places.sort_by(|a, b| compare_names(&a.name, &b.name));
        places
    }

    /// Nearest taxi cities for a municipality.
    pub fn nearest_cities<R>(
        &self,
        resolver: &DistanceResolver<R>,
        municipality: &Place,
        n: usize,
    ) -> Vec<RankedPlace>
    where
        R: RoutingService + Sync,
    {
        nearest_n(resolver, municipality, &self.cities, n)
    }
}

fn into_places(
    records: Vec<PlaceRecord>,
    collection: &'static str,
) -> Result<Vec<Place>, DataLoadError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            Place::try_from(record).map_err(|err| DataLoadError::InvalidPlace {
                collection,
                index,
                reason: err.to_string(),
            })
        })
        .collect()
}

fn collect_districts(municipalities: &[Place]) -> Vec<District> {
    let mut districts: Vec<District> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for place in municipalities {
        match positions.get(place.district.as_str()) {
            Some(&position) => districts[position].municipality_count += 1,
            None => {
                positions.insert(place.district.as_str(), districts.len());
                districts.push(District {
                    name: place.district.clone(),
                    slug: district_slug(&place.district),
                    region: place.region.clone(),
                    region_slug: region_slug(&place.region),
                    municipality_count: 1,
                });
            }
        }
    }

    districts.sort_by(|a, b| compare_names(&a.name, &b.name));
    districts
}

/// Orders display names the way Slovak dictionaries do.
///
/// Č, Š, Ž, Ä, Ô and the digraph "ch" are letters of their own (ch sorts
/// after h); other accents only break ties.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(name: &str) -> Vec<(char, u8)> {
    let lower: String = name.nfc().collect::<String>().to_lowercase();
    let mut key = Vec::with_capacity(lower.len());
    let mut chars = lower.chars().peekable();

    while let Some(ch) = chars.next() {
        let weight = match ch {
            'c' if chars.peek() == Some(&'h') => {
                chars.next();
                ('h', 1)
            }
            'č' => ('c', 1),
            'ä' => ('a', 1),
            'ô' => ('o', 1),
            'š' => ('s', 1),
            'ž' => ('z', 1),
            other => (std::iter::once(other).nfd().next().unwrap_or(other), 0),
        };
        key.push(weight);
    }
    key
}

fn first_index_by<F>(places: &[Place], key: F) -> HashMap<String, usize>
where
    F: Fn(&Place) -> &String,
{
    let mut index = HashMap::with_capacity(places.len());
    for (position, place) in places.iter().enumerate() {
        index.entry(key(place).clone()).or_insert(position);
    }
    index
}
