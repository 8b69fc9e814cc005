//! Seams between the resolver and its outbound collaborators.
//!
//! Concrete HTTP clients live in [`crate::osrm`] and [`crate::ors`]; tests
//! plug in their own implementations.

use crate::place::Coordinates;
use crate::routing::{RouteSummary, RoutingError};

/// A remote service that computes a driving route between two points.
///
/// Implementations report every failure (transport, status, payload) as an
/// error; the caller decides how to degrade.
pub trait RoutingService {
    /// Short name for logs, e.g. `"osrm"`.
    fn name(&self) -> &str;

    fn route(&self, from: Coordinates, to: Coordinates) -> Result<RouteSummary, RoutingError>;
}

impl<T: RoutingService + ?Sized> RoutingService for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn route(&self, from: Coordinates, to: Coordinates) -> Result<RouteSummary, RoutingError> {
        (**self).route(from, to)
    }
}

impl<T: RoutingService + ?Sized> RoutingService for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn route(&self, from: Coordinates, to: Coordinates) -> Result<RouteSummary, RoutingError> {
        (**self).route(from, to)
    }
}
