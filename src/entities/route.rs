use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

/// A path returned by a directions provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub path: Vec<Coordinates>,
    pub distance_meters: f64,
    pub eta_seconds: f64,
}

impl Route {
    pub fn new(path: Vec<Coordinates>, distance_meters: f64, eta_seconds: f64) -> Self {
        Self {
            path,
            distance_meters,
            eta_seconds,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum RouteSummary {
    Available {
        distance_meters: f64,
        eta_seconds: f64,
    },
    Unavailable,
}

pub const SUMMARY_PENDING: &str = "Calculating route…";
pub const SUMMARY_FALLBACK: &str = "Route preview unavailable";

impl RouteSummary {
    pub fn from_route(route: &Route) -> Self {
        Self::Available {
            distance_meters: route.distance_meters,
            eta_seconds: route.eta_seconds,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }

    /// Human-readable text, e.g. `12.3 km · 15 min`.
    pub fn describe(&self) -> String {
        match self {
            Self::Available {
                distance_meters,
                eta_seconds,
            } => {
                let km = distance_meters / 1000.0;
                let minutes = (eta_seconds / 60.0).ceil() as i64;
                format!("{:.1} km · {} min", km, minutes)
            }
            Self::Unavailable => SUMMARY_FALLBACK.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_rounds_minutes_up() {
        let summary = RouteSummary::Available {
            distance_meters: 12_345.0,
            eta_seconds: 61.0,
        };
        assert_eq!(summary.describe(), "12.3 km · 2 min");
    }

    #[test]
    fn unavailable_summary_uses_fallback() {
        assert_eq!(RouteSummary::Unavailable.describe(), SUMMARY_FALLBACK);
    }
}
