//! Turns the loosely-shaped options a caller hands to `startNavigation` into a
//! [`NavigationRequest`].
//!
//! Several input shapes have accumulated over time. Each endpoint is resolved by
//! walking an ordered table of shapes; the first shape that yields finite
//! coordinates wins.
//!
//! Legacy behaviour: on the flat `originLat`/`originLng` path an origin of
//! exactly `(0, 0)` is read as "no origin" and replaced by the device's current
//! location. A real origin on the equator at the prime meridian cannot be
//! expressed through that path. Callers that need it should send a nested
//! `origin` object, whose presence is taken at face value.
//!
//! Older clients dropped a flat origin when either component was zero. Here
//! both must be zero, so a replayed `originLat: 0, originLng: 30` now routes
//! from that point instead of from the device.

use serde_json::{Map, Value};

use crate::entities::{
    Coordinates, HeaderOptions, NavigationRequest, ProviderPreference, Stop, TravelMode,
    DEFAULT_TITLE,
};
use crate::error::{missing_destination_error, Error};

pub const CURRENT_LOCATION: &str = "current-location";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Endpoint {
    Origin,
    Destination,
}

impl Endpoint {
    fn nested_key(&self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::Destination => "destination",
        }
    }

    fn flat_keys(&self) -> (&'static str, &'static str) {
        match self {
            Self::Origin => ("originLat", "originLng"),
            Self::Destination => ("destLat", "destLng"),
        }
    }
}

/// Where a coordinate was found. Only the flat shape is subject to the legacy
/// `(0, 0)` heuristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Provenance {
    Structured,
    LegacyFlat,
}

struct Shape {
    name: &'static str,
    provenance: Provenance,
    extract: fn(&Map<String, Value>, Endpoint) -> Option<Coordinates>,
}

const ENDPOINT_SHAPES: [Shape; 3] = [
    Shape {
        name: "nested lat/lng",
        provenance: Provenance::Structured,
        extract: nested_lat_lng,
    },
    Shape {
        name: "nested latitude/longitude",
        provenance: Provenance::Structured,
        extract: nested_latitude_longitude,
    },
    Shape {
        name: "flat lat/lng fields",
        provenance: Provenance::LegacyFlat,
        extract: flat_fields,
    },
];

type ItemShape = fn(&Value) -> Option<Coordinates>;

const WAYPOINT_SHAPES: [ItemShape; 3] = [object_lat_lng, object_latitude_longitude, numeric_pair];

fn nested_lat_lng(options: &Map<String, Value>, endpoint: Endpoint) -> Option<Coordinates> {
    options.get(endpoint.nested_key()).and_then(object_lat_lng)
}

fn nested_latitude_longitude(
    options: &Map<String, Value>,
    endpoint: Endpoint,
) -> Option<Coordinates> {
    options
        .get(endpoint.nested_key())
        .and_then(object_latitude_longitude)
}

fn flat_fields(options: &Map<String, Value>, endpoint: Endpoint) -> Option<Coordinates> {
    let (lat, lng) = endpoint.flat_keys();
    pair(options.get(lat)?, options.get(lng)?)
}

fn object_lat_lng(value: &Value) -> Option<Coordinates> {
    let object = value.as_object()?;
    pair(object.get("lat")?, object.get("lng")?)
}

fn object_latitude_longitude(value: &Value) -> Option<Coordinates> {
    let object = value.as_object()?;
    pair(object.get("latitude")?, object.get("longitude")?)
}

fn numeric_pair(value: &Value) -> Option<Coordinates> {
    match value.as_array()?.as_slice() {
        [lat, lng] => pair(lat, lng),
        _ => None,
    }
}

fn pair(lat: &Value, lng: &Value) -> Option<Coordinates> {
    Coordinates::new(lat.as_f64()?, lng.as_f64()?)
}

fn resolve(options: &Map<String, Value>, endpoint: Endpoint) -> Option<(Coordinates, Provenance)> {
    ENDPOINT_SHAPES.iter().find_map(|shape| {
        let coordinates = (shape.extract)(options, endpoint)?;
        tracing::trace!(shape = shape.name, ?endpoint, "matched input shape");
        Some((coordinates, shape.provenance))
    })
}

fn resolve_origin(options: &Map<String, Value>) -> Stop {
    if options.get("origin").and_then(Value::as_str) == Some(CURRENT_LOCATION) {
        return Stop::CurrentLocation;
    }

    match resolve(options, Endpoint::Origin) {
        Some((coordinates, Provenance::LegacyFlat)) if coordinates.is_null_island() => {
            tracing::debug!("flat origin of (0,0) treated as current location");
            Stop::CurrentLocation
        }
        Some((coordinates, _)) => Stop::At(coordinates),
        None => Stop::CurrentLocation,
    }
}

fn resolve_waypoints(options: &Map<String, Value>) -> Vec<Coordinates> {
    let items = match options.get("waypoints").and_then(Value::as_array) {
        Some(items) => items,
        None => return vec![],
    };

    let waypoints: Vec<Coordinates> = items
        .iter()
        .filter_map(|item| WAYPOINT_SHAPES.iter().find_map(|shape| shape(item)))
        .collect();

    if waypoints.len() != items.len() {
        tracing::debug!(
            dropped = items.len() - waypoints.len(),
            "dropped unparsable waypoints"
        );
    }

    waypoints
}

fn string_field<'a>(options: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| options.get(*key).and_then(Value::as_str))
}

fn bool_field(options: &Map<String, Value>, key: &str, default: bool) -> bool {
    options.get(key).and_then(Value::as_bool).unwrap_or(default)
}

/// Normalizes raw caller options. Fails only when no shape yields a destination.
#[tracing::instrument(skip(raw))]
pub fn normalize(raw: &Value) -> Result<NavigationRequest, Error> {
    let empty = Map::new();
    let options = raw.as_object().unwrap_or(&empty);

    let (destination, _) =
        resolve(options, Endpoint::Destination).ok_or_else(missing_destination_error)?;

    let travel_mode = string_field(options, &["travelMode", "mode"])
        .map(TravelMode::from_lossy)
        .unwrap_or_default();

    let preferred_provider = string_field(options, &["preferredProvider"])
        .map(ProviderPreference::from_lossy)
        .unwrap_or_default();

    let title = string_field(options, &["title"])
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_TITLE)
        .to_string();

    let header = HeaderOptions {
        show: bool_field(options, "showHeader", true),
        logo_url: string_field(options, &["logoUrl"])
            .filter(|u| !u.is_empty())
            .map(String::from),
    };

    Ok(NavigationRequest {
        origin: resolve_origin(options),
        destination,
        waypoints: resolve_waypoints(options),
        travel_mode,
        title,
        preferred_provider,
        simulate: bool_field(options, "simulate", false),
        header,
    })
}
