//! Best-available distance between two places.
//!
//! Fixed priority: precomputed table, then the remote routing service, then a
//! straight-line estimate. Resolution always produces a value; callers that
//! care about quality inspect [`ResolvedDistance::source`].

use serde::Serialize;
use tracing::{debug, warn};

use crate::distance_table::DistanceTable;
use crate::haversine::{DEFAULT_SPEED_KMH, estimate_duration_minutes, haversine_km};
use crate::place::{Coordinates, Place};
use crate::polyline::Polyline;
use crate::routing::{RouteSummary, RoutingError};
use crate::traits::RoutingService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DistanceSource {
    Precomputed,
    RemoteRoutingService,
    StraightLineEstimate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDistance {
    pub distance_km: f64,
    pub duration_minutes: u32,
    pub source: DistanceSource,
    /// Route shape for map display; `None` for precomputed results.
    pub geometry: Option<Polyline>,
}

#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// Average speed used to turn a straight-line distance into minutes.
    pub average_speed_kmh: f64,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            average_speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

/// Routing service placeholder for resolvers without remote access.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRouting;

impl RoutingService for NoRouting {
    fn name(&self) -> &str {
        "none"
    }

    fn route(&self, _from: Coordinates, _to: Coordinates) -> Result<RouteSummary, RoutingError> {
        Err(RoutingError::NotConfigured("no routing service".to_string()))
    }
}

pub struct DistanceResolver<R> {
    table: DistanceTable,
    routing: R,
    options: ResolverOptions,
}

impl DistanceResolver<NoRouting> {
    /// Resolver that only uses the table and the straight-line estimate.
    pub fn offline(table: DistanceTable) -> Self {
        Self::new(table, NoRouting)
    }
}

impl<R: RoutingService> DistanceResolver<R> {
    pub fn new(table: DistanceTable, routing: R) -> Self {
        Self::with_options(table, routing, ResolverOptions::default())
    }

    pub fn with_options(table: DistanceTable, routing: R, options: ResolverOptions) -> Self {
        Self {
            table,
            routing,
            options,
        }
    }

    pub fn table(&self) -> &DistanceTable {
        &self.table
    }

    pub fn resolve(&self, origin: &Place, destination: &Place) -> ResolvedDistance {
        if let Some(record) = self
            .table
            .lookup(&origin.identifier, &destination.identifier)
        {
            return ResolvedDistance {
                distance_km: record.road_distance_km,
                duration_minutes: record.duration_minutes,
                source: DistanceSource::Precomputed,
                geometry: None,
            };
        }

        self.resolve_coordinates(origin.coordinates, destination.coordinates)
    }

    /// Remote route or straight-line estimate for raw coordinates.
    pub fn resolve_coordinates(&self, from: Coordinates, to: Coordinates) -> ResolvedDistance {
        match self.routing.route(from, to) {
            Ok(route) => {
                debug!(
                    provider = %route.provider,
                    distance_km = route.distance_km,
                    "resolved distance from routing service"
                );
                return ResolvedDistance {
                    distance_km: route.distance_km,
                    duration_minutes: route.duration_minutes,
                    source: DistanceSource::RemoteRoutingService,
                    geometry: Some(route.geometry),
                };
            }
            Err(RoutingError::NotConfigured(what)) => {
                debug!(service = self.routing.name(), %what, "routing service not configured");
            }
            Err(err) => {
                warn!(service = self.routing.name(), error = %err, "routing service unavailable, using straight-line estimate");
            }
        }

        self.straight_line(from, to)
    }

    fn straight_line(&self, from: Coordinates, to: Coordinates) -> ResolvedDistance {
        let distance_km = haversine_km(from, to);
        ResolvedDistance {
            distance_km,
            duration_minutes: estimate_duration_minutes(distance_km, self.options.average_speed_kmh),
            source: DistanceSource::StraightLineEstimate,
            geometry: Some(Polyline::straight(from, to)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance_table::DistanceRecord;

    fn place(name: &str, lat: f64, lng: f64) -> Place {
        Place::new(name, "Nové Mesto nad Váhom", "Trenčiansky kraj", Coordinates::new(lat, lng).unwrap())
    }

    #[test]
    fn test_offline_resolver_uses_table_then_straight_line() {
        let table = DistanceTable::from_records(vec![DistanceRecord {
            origin_slug: "visnove".to_string(),
            destination_slug: "nove-mesto-nad-vahom".to_string(),
            straight_line_distance_km: 4.9,
            road_distance_km: 6.8,
            duration_minutes: 9,
        }]);
        let resolver = DistanceResolver::offline(table);
        let visnove = place("Višňové", 48.7230, 17.8689);
        let nove_mesto = place("Nové Mesto nad Váhom", 48.7576, 17.8303);

        let forward = resolver.resolve(&visnove, &nove_mesto);
        assert_eq!(forward.source, DistanceSource::Precomputed);
        assert_eq!(forward.distance_km, 6.8);
        assert!(forward.geometry.is_none());

        let back = resolver.resolve(&nove_mesto, &visnove);
        assert_eq!(back.source, DistanceSource::StraightLineEstimate);
        assert_eq!(back.distance_km, haversine_km(nove_mesto.coordinates, visnove.coordinates));
    }

    #[test]
    fn test_straight_line_duration_uses_average_speed() {
        let resolver = DistanceResolver::with_options(
            DistanceTable::default(),
            NoRouting,
            ResolverOptions {
                average_speed_kmh: 60.0,
            },
        );
        let a = Coordinates::new(48.0, 17.0).unwrap();
        let b = Coordinates::new(48.0, 18.0).unwrap();
        let resolved = resolver.resolve_coordinates(a, b);
        assert_eq!(resolved.source, DistanceSource::StraightLineEstimate);
        assert_eq!(
            resolved.duration_minutes,
            (resolved.distance_km / 60.0 * 60.0).round() as u32
        );
        assert_eq!(resolved.geometry.unwrap().points().len(), 2);
    }

    #[test]
    fn test_source_serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&DistanceSource::RemoteRoutingService).unwrap(),
            "\"remoteRoutingService\""
        );
    }
}
