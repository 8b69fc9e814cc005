//! Remote routing results, errors, and the provider fallback chain.

use std::fmt;

use tracing::{info, warn};

use crate::ors::{OrsClient, OrsConfig};
use crate::osrm::{OsrmClient, OsrmConfig};
use crate::place::Coordinates;
use crate::polyline::Polyline;
use crate::traits::RoutingService;

/// A driving route as reported by a routing service.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub duration_minutes: u32,
    pub geometry: Polyline,
    /// Name of the service that produced the route.
    pub provider: String,
}

impl RouteSummary {
    /// Builds a summary from the raw meters/seconds that services return.
    ///
    /// Distance keeps one decimal, duration is whole minutes.
    pub fn from_raw(
        provider: impl Into<String>,
        distance_meters: f64,
        duration_seconds: f64,
        geometry: Polyline,
    ) -> Self {
        Self {
            distance_km: (distance_meters / 100.0).round() / 10.0,
            duration_minutes: (duration_seconds / 60.0).round().max(0.0) as u32,
            geometry,
            provider: provider.into(),
        }
    }
}

/// The routing service could not produce a route.
#[derive(Debug)]
pub enum RoutingError {
    /// Service is not configured (e.g. missing API key).
    NotConfigured(String),
    Http(reqwest::Error),
    /// Reachable, but answered with a non-success status code or field.
    Status(String),
    /// Response body did not have the expected shape.
    Payload(String),
    NoRoute,
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured(what) => write!(f, "routing service not configured: {}", what),
            Self::Http(err) => write!(f, "routing request failed: {}", err),
            Self::Status(status) => write!(f, "routing service returned {}", status),
            Self::Payload(detail) => write!(f, "malformed routing response: {}", detail),
            Self::NoRoute => write!(f, "routing service returned no route"),
        }
    }
}

impl std::error::Error for RoutingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RoutingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RoutingError::Payload(err.to_string())
        } else {
            RoutingError::Http(err)
        }
    }
}

/// Tries each service in order and returns the first route.
///
/// An empty chain always fails with [`RoutingError::NotConfigured`].
pub struct RoutingChain {
    services: Vec<Box<dyn RoutingService + Send + Sync>>,
}

impl RoutingChain {
    pub fn new() -> Self {
        Self {
            services: Vec::new(),
        }
    }

    /// OpenRouteService when `ORS_API_KEY` is set, then OSRM.
    pub fn from_env() -> Result<Self, RoutingError> {
        let mut chain = Self::new();

        let ors = OrsClient::new(OrsConfig::from_env())?;
        if ors.is_configured() {
            chain = chain.with_service(ors);
        } else {
            info!("ORS_API_KEY not set, routing with OSRM only");
        }

        Ok(chain.with_service(OsrmClient::new(OsrmConfig::from_env())?))
    }

    pub fn with_service(mut self, service: impl RoutingService + Send + Sync + 'static) -> Self {
        self.services.push(Box::new(service));
        self
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Default for RoutingChain {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutingService for RoutingChain {
    fn name(&self) -> &str {
        "chain"
    }

    fn route(&self, from: Coordinates, to: Coordinates) -> Result<RouteSummary, RoutingError> {
        let mut last_error = RoutingError::NotConfigured("empty routing chain".to_string());

        for service in &self.services {
            match service.route(from, to) {
                Ok(route) => return Ok(route),
                Err(err) => {
                    warn!(service = service.name(), error = %err, "routing service failed, trying next");
                    last_error = err;
                }
            }
        }

        Err(last_error)
    }
}
