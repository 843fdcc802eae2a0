use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    config::ApiKey,
    entities::{Coordinates, Route, TravelMode},
    error::{invalid_input_error, upstream_error, Error},
    external::DirectionsProvider,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    status: String,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct DirectionsRoute {
    overview_polyline: Polyline,
    #[serde(default)]
    legs: Vec<Leg>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Polyline {
    points: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Leg {
    distance: Measure,
    duration: Measure,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Measure {
    value: f64,
}

/// Google Directions API client used for the embedded preview.
#[derive(Clone, Debug)]
pub struct GoogleMaps {
    api_base: String,
    api_key: ApiKey,
    client: reqwest::Client,
}

impl GoogleMaps {
    pub fn new(api_base: String, api_key: ApiKey) -> Self {
        Self {
            api_base,
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DirectionsProvider for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn calculate_route(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
        mode: TravelMode,
    ) -> Result<Option<Route>, Error> {
        let origin: String = (*origin).into();
        let destination: String = (*destination).into();

        let url = format!("https://{}/maps/api/directions/json", self.api_base);
        let key = self.api_key.get().await.ok_or_else(invalid_input_error)?;

        let res = self
            .client
            .get(url)
            .query(&[("key", key)])
            .query(&[("origin", origin)])
            .query(&[("destination", destination)])
            .query(&[("mode", mode.name())])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if (400..500).contains(&status_code) {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let data: Response = res.json().await?;

        match data.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" | "NOT_FOUND" => return Ok(None),
            _ => return Err(upstream_error()),
        }

        Ok(data.routes.first().map(to_route))
    }
}

fn to_route(route: &DirectionsRoute) -> Route {
    let distance_meters = route.legs.iter().map(|l| l.distance.value).sum();
    let eta_seconds = route.legs.iter().map(|l| l.duration.value).sum();

    Route::new(
        decode_polyline(&route.overview_polyline.points),
        distance_meters,
        eta_seconds,
    )
}

/// Decodes Google's encoded polyline format (precision 1e-5). Stops at the
/// first truncated value.
pub fn decode_polyline(encoded: &str) -> Vec<Coordinates> {
    let mut bytes = encoded.bytes();
    let mut path = vec![];
    let (mut lat, mut lng) = (0i64, 0i64);

    loop {
        let d_lat = match next_value(&mut bytes) {
            Some(v) => v,
            None => break,
        };
        let d_lng = match next_value(&mut bytes) {
            Some(v) => v,
            None => break,
        };

        lat += d_lat;
        lng += d_lng;

        if let Some(c) = Coordinates::new(lat as f64 / 1e5, lng as f64 / 1e5) {
            path.push(c);
        }
    }

    path
}

fn next_value(bytes: &mut impl Iterator<Item = u8>) -> Option<i64> {
    let mut result = 0i64;
    let mut shift = 0;

    loop {
        let chunk = (bytes.next()? as i64) - 63;
        if chunk < 0 || shift > 60 {
            return None;
        }

        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Some(if result & 1 != 0 { !(result >> 1) } else { result >> 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_reference_polyline() {
        let path = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@");
        let expected = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];

        assert_eq!(path.len(), expected.len());
        for (point, (lat, lng)) in path.iter().zip(expected.iter()) {
            assert!((point.latitude - lat).abs() < 1e-9);
            assert!((point.longitude - lng).abs() < 1e-9);
        }
    }

    #[test]
    fn truncated_polyline_keeps_complete_points() {
        assert_eq!(decode_polyline("_p~iF~ps|U_ul").len(), 1);
        assert!(decode_polyline("").is_empty());
    }

    #[test]
    fn route_sums_legs() {
        let data: Response = serde_json::from_value(serde_json::json!({
            "status": "OK",
            "routes": [{
                "overview_polyline": {"points": "_p~iF~ps|U"},
                "legs": [
                    {"distance": {"value": 1000}, "duration": {"value": 60}},
                    {"distance": {"value": 500}, "duration": {"value": 30}}
                ]
            }]
        }))
        .unwrap();

        let route = to_route(&data.routes[0]);
        assert_eq!(route.distance_meters, 1500.0);
        assert_eq!(route.eta_seconds, 90.0);
        assert_eq!(route.path.len(), 1);
    }
}
