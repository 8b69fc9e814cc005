//! `/taxi/...` path resolution.
//!
//! Maps path segments to the page that should render them, a permanent
//! redirect to the canonical URL, or not-found.

use crate::directory::{Directory, District};
use crate::place::Place;

#[derive(Debug, Clone, PartialEq)]
pub enum RouteTarget<'a> {
    /// `/taxi/{city}`: a town with taxi services.
    City(&'a Place),
    /// `/taxi/{region}/{district}`
    District(&'a District),
    /// `/taxi/{region}/{district}/{municipality}`
    Municipality {
        municipality: &'a Place,
        district: &'a District,
    },
    /// Permanent redirect to a canonical path.
    Redirect(String),
    NotFound,
}

pub fn city_path(city: &Place) -> String {
    format!("/taxi/{}", city.slug)
}

pub fn detect_route<'a, S: AsRef<str>>(directory: &'a Directory, segments: &[S]) -> RouteTarget<'a> {
    match segments {
        [slug] => detect_single(directory, slug.as_ref()),
        [region, district] => match directory.district(region.as_ref(), district.as_ref()) {
            Some(district) => RouteTarget::District(district),
            None => RouteTarget::NotFound,
        },
        [region, district, municipality] => detect_hierarchical(
            directory,
            region.as_ref(),
            district.as_ref(),
            municipality.as_ref(),
        ),
        _ => RouteTarget::NotFound,
    }
}

fn detect_single<'a>(directory: &'a Directory, slug: &str) -> RouteTarget<'a> {
    if let Some(city) = directory.city(slug) {
        return RouteTarget::City(city);
    }

    // Legacy flat municipality URLs move to the hierarchical form.
    match directory.resolve_municipality_hierarchy(slug) {
        Some(hierarchy) => RouteTarget::Redirect(hierarchy.canonical_path()),
        None => RouteTarget::NotFound,
    }
}

fn detect_hierarchical<'a>(
    directory: &'a Directory,
    region_slug: &str,
    district_slug: &str,
    municipality_slug: &str,
) -> RouteTarget<'a> {
    let Some(district) = directory.district(region_slug, district_slug) else {
        return RouteTarget::NotFound;
    };

    // Towns with their own taxi page are canonical at /taxi/{city}.
    if let Some(city) = directory.city(municipality_slug) {
        return RouteTarget::Redirect(city_path(city));
    }

    let municipality = directory
        .municipalities_in_district(district)
        .into_iter()
        .find(|place| place.slug == municipality_slug || place.identifier == municipality_slug);

    match municipality {
        Some(municipality) => RouteTarget::Municipality {
            municipality,
            district,
        },
        None => RouteTarget::NotFound,
    }
}
