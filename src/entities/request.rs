use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

pub const DEFAULT_TITLE: &str = "Navigation";

/// Start of a trip: either the device's own position or a fixed point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stop {
    CurrentLocation,
    At(Coordinates),
}

impl Stop {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Self::CurrentLocation => None,
            Self::At(coordinates) => Some(*coordinates),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Transit,
}

impl TravelMode {
    /// Maps a free-form mode onto the closest supported one, defaulting to driving.
    pub fn from_lossy(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "walking" | "walk" | "foot" | "pedestrian" | "on_foot" => Self::Walking,
            "transit" | "public" | "public_transport" | "bus" | "train" | "subway" | "rail" => {
                Self::Transit
            }
            _ => Self::Driving,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Transit => "transit",
        }
    }
}

/// Which launch control gets visual emphasis.
///
/// `EmbeddedOnly` keeps the system map primary. `NativeSecondary` promotes the
/// installed third-party app, with the system map as the secondary control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderPreference {
    EmbeddedOnly,
    #[default]
    NativeSecondary,
}

impl ProviderPreference {
    pub fn from_lossy(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "embedded-only" | "embedded" | "system" | "native" => Self::EmbeddedOnly,
            _ => Self::NativeSecondary,
        }
    }

    pub fn prefers_native(&self) -> bool {
        matches!(self, Self::EmbeddedOnly)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeaderOptions {
    pub show: bool,
    pub logo_url: Option<String>,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            show: true,
            logo_url: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationRequest {
    pub origin: Stop,
    pub destination: Coordinates,
    pub waypoints: Vec<Coordinates>,
    pub travel_mode: TravelMode,
    pub title: String,
    pub preferred_provider: ProviderPreference,
    pub simulate: bool,
    pub header: HeaderOptions,
}

impl NavigationRequest {
    pub fn new(origin: Stop, destination: Coordinates) -> Self {
        Self {
            origin,
            destination,
            waypoints: vec![],
            travel_mode: TravelMode::default(),
            title: DEFAULT_TITLE.into(),
            preferred_provider: ProviderPreference::default(),
            simulate: false,
            header: HeaderOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_mode_falls_back_to_driving() {
        assert_eq!(TravelMode::from_lossy("WALKING"), TravelMode::Walking);
        assert_eq!(TravelMode::from_lossy(" bus "), TravelMode::Transit);
        assert_eq!(TravelMode::from_lossy("bicycling"), TravelMode::Driving);
        assert_eq!(TravelMode::from_lossy(""), TravelMode::Driving);
    }

    #[test]
    fn preference_defaults_to_native_secondary() {
        assert_eq!(
            ProviderPreference::from_lossy("third-party"),
            ProviderPreference::NativeSecondary
        );
        assert_eq!(
            ProviderPreference::from_lossy("Embedded-Only"),
            ProviderPreference::EmbeddedOnly
        );
        assert!(!ProviderPreference::default().prefers_native());
    }
}
