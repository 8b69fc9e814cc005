//! OSRM HTTP adapter for single driving routes.

use serde::Deserialize;

use crate::place::Coordinates;
use crate::polyline::Polyline;
use crate::routing::{RouteSummary, RoutingError};
use crate::traits::RoutingService;

const PROVIDER: &str = "osrm";

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

impl OsrmConfig {
    /// Defaults, with `OSRM_BASE_URL` overriding the public demo server.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var("OSRM_BASE_URL") {
            if !base_url.trim().is_empty() {
                config.base_url = base_url.trim().trim_end_matches('/').to_string();
            }
        }
        config
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, from: Coordinates, to: Coordinates) -> String {
        // OSRM takes lng,lat pairs
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=polyline",
            self.config.base_url,
            self.config.profile,
            from.longitude(),
            from.latitude(),
            to.longitude(),
            to.latitude()
        )
    }
}

impl RoutingService for OsrmClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn route(&self, from: Coordinates, to: Coordinates) -> Result<RouteSummary, RoutingError> {
        let response = self.client.get(self.route_url(from, to)).send()?;
        let status = response.status();

        // Error answers usually still carry a JSON `code`.
        let body = match response.json::<OsrmRouteResponse>() {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(RoutingError::Status(status.to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        summary_from_response(body)
    }
}

fn summary_from_response(body: OsrmRouteResponse) -> Result<RouteSummary, RoutingError> {
    if body.code != "Ok" {
        let detail = match body.message {
            Some(message) => format!("{}: {}", body.code, message),
            None => body.code,
        };
        return Err(RoutingError::Status(detail));
    }

    let route = body
        .routes
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or(RoutingError::NoRoute)?;

    let geometry = match route.geometry {
        Some(encoded) => Polyline::decode(&encoded)
            .ok_or_else(|| RoutingError::Payload("undecodable route geometry".to_string()))?,
        None => Polyline::new(Vec::new()),
    };

    Ok(RouteSummary::from_raw(
        PROVIDER,
        route.distance,
        route.duration,
        geometry,
    ))
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    #[serde(default)]
    geometry: Option<String>,
}
