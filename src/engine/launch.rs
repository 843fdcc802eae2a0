use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::entities::{NavigationRequest, Stop, TravelMode};

/// Native multi-stop launch for the platform's own maps app.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemLaunch {
    pub stops: Vec<Stop>,
    pub travel_mode: TravelMode,
}

pub fn build_system_launch(request: &NavigationRequest) -> SystemLaunch {
    let mut stops = Vec::with_capacity(request.waypoints.len() + 2);
    stops.push(request.origin);
    stops.extend(request.waypoints.iter().copied().map(Stop::At));
    stops.push(Stop::At(request.destination));

    SystemLaunch {
        stops,
        travel_mode: request.travel_mode,
    }
}

/// Deep link into the third-party maps app, e.g.
/// `comgooglemaps://?saddr=1,2&daddr=3,4&directionsmode=walking&waypoints=5,6`.
///
/// `saddr` is left out when the trip starts at the current location so the app
/// locates the device itself. Returns `None` if `base` does not form a URL.
pub fn build_third_party_launch(request: &NavigationRequest, base: &str) -> Option<Url> {
    let mut params: Vec<(&str, String)> = vec![];

    if let Some(origin) = request.origin.coordinates() {
        params.push(("saddr", origin.into()));
    }
    params.push(("daddr", request.destination.into()));
    params.push(("directionsmode", request.travel_mode.name().into()));

    if !request.waypoints.is_empty() {
        let waypoints: Vec<String> = request.waypoints.iter().map(|w| w.to_string()).collect();
        params.push(("waypoints", waypoints.join("|")));
    }

    let query: Vec<String> = params
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();

    let separator = if base.contains('?') { "&" } else { "?" };

    Url::parse(&format!("{}{}{}", base, separator, query.join("&"))).ok()
}
