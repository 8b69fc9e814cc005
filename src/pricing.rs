//! Taxi fare range from a distance.
//!
//! Road distances include the boarding fee and a ±15% band across taxi
//! companies. Straight-line distances skip the boarding fee and use ±10%.
//! The two modes are intentionally not unified.

use std::fmt;

use serde::Serialize;

use crate::resolver::{DistanceSource, ResolvedDistance};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PriceMode {
    StraightLine,
    Road,
}

impl From<DistanceSource> for PriceMode {
    fn from(source: DistanceSource) -> Self {
        match source {
            DistanceSource::StraightLineEstimate => PriceMode::StraightLine,
            DistanceSource::Precomputed | DistanceSource::RemoteRoutingService => PriceMode::Road,
        }
    }
}

/// Whole-currency price range (EUR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceEstimate {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PriceError {
    InvalidDistance(f64),
}

impl fmt::Display for PriceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDistance(km) => {
                write!(f, "distance must be finite and non-negative, got {}", km)
            }
        }
    }
}

impl std::error::Error for PriceError {}

#[derive(Debug, Clone)]
pub struct PriceTariff {
    /// Boarding fee, charged in road mode only.
    pub base_fare: f64,
    pub price_per_km: f64,
    /// (min, max) multipliers for road distances.
    pub road_band: (f64, f64),
    /// (min, max) multipliers for straight-line distances.
    pub straight_line_band: (f64, f64),
}

impl Default for PriceTariff {
    fn default() -> Self {
        Self {
            base_fare: 2.0,
            price_per_km: 1.0,
            road_band: (0.85, 1.15),
            straight_line_band: (0.9, 1.1),
        }
    }
}

impl PriceTariff {
    pub fn estimate(&self, distance_km: f64, mode: PriceMode) -> Result<PriceEstimate, PriceError> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(PriceError::InvalidDistance(distance_km));
        }

        let (base_price, (low, high)) = match mode {
            PriceMode::Road => (
                self.base_fare + distance_km * self.price_per_km,
                self.road_band,
            ),
            PriceMode::StraightLine => (distance_km * self.price_per_km, self.straight_line_band),
        };

        Ok(PriceEstimate {
            min: ceil_price(base_price * low),
            max: ceil_price(base_price * high),
        })
    }

    /// Picks the mode from where the distance came from.
    pub fn estimate_resolved(&self, resolved: &ResolvedDistance) -> Result<PriceEstimate, PriceError> {
        self.estimate(resolved.distance_km, PriceMode::from(resolved.source))
    }
}

/// Estimate with the default tariff.
pub fn estimate(distance_km: f64, mode: PriceMode) -> Result<PriceEstimate, PriceError> {
    PriceTariff::default().estimate(distance_km, mode)
}

// 10.0 * 1.1 can land a hair above 11.0; trim float noise before ceil.
fn ceil_price(value: f64) -> u32 {
    let rounded = (value * 1e9).round() / 1e9;
    rounded.ceil().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_road_mode_includes_base_fare() {
        // 2 + 10 = 12; ceil(10.2) = 11, ceil(13.8) = 14
        assert_eq!(
            estimate(10.0, PriceMode::Road).unwrap(),
            PriceEstimate { min: 11, max: 14 }
        );
    }

    #[test]
    fn test_straight_line_mode_has_no_base_fare() {
        // ceil(9.0) = 9, ceil(11.0) = 11
        assert_eq!(
            estimate(10.0, PriceMode::StraightLine).unwrap(),
            PriceEstimate { min: 9, max: 11 }
        );
    }

    #[test]
    fn test_zero_distance() {
        assert_eq!(
            estimate(0.0, PriceMode::StraightLine).unwrap(),
            PriceEstimate { min: 0, max: 0 }
        );
        assert_eq!(
            estimate(0.0, PriceMode::Road).unwrap(),
            PriceEstimate { min: 2, max: 3 }
        );
    }

    #[test]
    fn test_invalid_distance_rejected() {
        assert_eq!(
            estimate(-1.0, PriceMode::Road),
            Err(PriceError::InvalidDistance(-1.0))
        );
        assert!(estimate(f64::NAN, PriceMode::StraightLine).is_err());
        assert!(estimate(f64::INFINITY, PriceMode::Road).is_err());
    }

    #[test]
    fn test_mode_follows_source() {
        let tariff = PriceTariff::default();
        let estimated = ResolvedDistance {
            distance_km: 10.0,
            duration_minutes: 15,
            source: DistanceSource::StraightLineEstimate,
            geometry: None,
        };
        assert_eq!(
            tariff.estimate_resolved(&estimated).unwrap(),
            PriceEstimate { min: 9, max: 11 }
        );

        let routed = ResolvedDistance {
            source: DistanceSource::Precomputed,
            ..estimated
        };
        assert_eq!(
            tariff.estimate_resolved(&routed).unwrap(),
            PriceEstimate { min: 11, max: 14 }
        );
    }
}
