//! Nearest-N ranking of places by resolved distance.

use std::cmp::Ordering;

use rayon::prelude::*;
use serde::Serialize;

use crate::place::Place;
use crate::resolver::{DistanceResolver, ResolvedDistance};
use crate::traits::RoutingService;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPlace {
    pub place: Place,
    pub distance: ResolvedDistance,
}

impl RankedPlace {
    pub fn distance_km(&self) -> f64 {
        self.distance.distance_km
    }
}

/// The `n` candidates closest to `target`, nearest first.
///
/// The target itself (same identifier) is skipped. Equal distances are
/// ordered by identifier. Candidates are resolved in parallel, so a remote
/// routing service may see up to one request per rayon worker at a time.
pub fn nearest_n<R>(
    resolver: &DistanceResolver<R>,
    target: &Place,
    candidates: &[Place],
    n: usize,
) -> Vec<RankedPlace>
where
    R: RoutingService + Sync,
{
    if n == 0 || candidates.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<RankedPlace> = candidates
        .par_iter()
        .filter(|candidate| candidate.identifier != target.identifier)
        .map(|candidate| RankedPlace {
            distance: resolver.resolve(target, candidate),
            place: candidate.clone(),
        })
        .collect();

    ranked.sort_by(compare_ranked);
    ranked.truncate(n);
    ranked
}

fn compare_ranked(a: &RankedPlace, b: &RankedPlace) -> Ordering {
    a.distance_km()
        .total_cmp(&b.distance_km())
        .then_with(|| a.place.identifier.cmp(&b.place.identifier))
}
