//! OpenRouteService directions adapter.
//!
//! Preferred over the public OSRM server for Central Europe when an API key
//! is available.

use serde::{Deserialize, Serialize};

use crate::place::Coordinates;
use crate::polyline::Polyline;
use crate::routing::{RouteSummary, RoutingError};
use crate::traits::RoutingService;

const PROVIDER: &str = "openrouteservice";

/// Snap radius in meters; remote villages can be far from a routable road.
const SNAP_RADIUS_M: u32 = 5000;

#[derive(Debug, Clone)]
pub struct OrsConfig {
    pub base_url: String,
    pub profile: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for OrsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openrouteservice.org".to_string(),
            profile: "driving-car".to_string(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

impl OrsConfig {
    /// Defaults with the key taken from `ORS_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("ORS_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            ..Self::default()
        }
    }

    /// Dashboard keys are JWTs (`ey...`) and need a bearer prefix.
    fn authorization(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| {
            if key.starts_with("ey") {
                format!("Bearer {}", key)
            } else {
                key.clone()
            }
        })
    }
}

#[derive(Debug, Clone)]
pub struct OrsClient {
    config: OrsConfig,
    client: reqwest::blocking::Client,
}

impl OrsClient {
    pub fn new(config: OrsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }
}

impl RoutingService for OrsClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn route(&self, from: Coordinates, to: Coordinates) -> Result<RouteSummary, RoutingError> {
        let authorization = self
            .config
            .authorization()
            .ok_or_else(|| RoutingError::NotConfigured("ORS_API_KEY".to_string()))?;

        let url = format!(
            "{}/v2/directions/{}",
            self.config.base_url, self.config.profile
        );

        let response = self
            .client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .json(&OrsDirectionsRequest::new(from, to))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RoutingError::Status(format!("{} {}", status, body.trim())));
        }

        summary_from_response(response.json::<OrsDirectionsResponse>()?)
    }
}

fn summary_from_response(body: OrsDirectionsResponse) -> Result<RouteSummary, RoutingError> {
    let route = body.routes.into_iter().next().ok_or(RoutingError::NoRoute)?;
    let geometry = Polyline::decode(&route.geometry)
        .ok_or_else(|| RoutingError::Payload("undecodable route geometry".to_string()))?;

    Ok(RouteSummary::from_raw(
        PROVIDER,
        route.summary.distance,
        route.summary.duration,
        geometry,
    ))
}

#[derive(Debug, Serialize)]
struct OrsDirectionsRequest {
    coordinates: [[f64; 2]; 2],
    radiuses: [u32; 2],
}

impl OrsDirectionsRequest {
    fn new(from: Coordinates, to: Coordinates) -> Self {
        Self {
            coordinates: [
                [from.longitude(), from.latitude()],
                [to.longitude(), to.latitude()],
            ],
            radiuses: [SNAP_RADIUS_M, SNAP_RADIUS_M],
        }
    }
}

#[derive(Debug, Deserialize)]
struct OrsDirectionsResponse {
    #[serde(default)]
    routes: Vec<OrsRoute>,
}

#[derive(Debug, Deserialize)]
struct OrsRoute {
    summary: OrsSummary,
    geometry: String,
}

#[derive(Debug, Deserialize)]
struct OrsSummary {
    // ORS omits both fields for zero-length routes
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}
