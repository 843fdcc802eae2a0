use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    config::ApiKey,
    entities::Coordinates,
    error::{invalid_input_error, upstream_error, Error},
    external::LocationProvider,
};

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Request {
    consider_ip: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    location: Location,
    accuracy: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

/// Google Geolocation API client. Without Wi-Fi or cell data in the request
/// the position comes from the caller's IP address.
#[derive(Clone, Debug)]
pub struct GoogleGeolocation {
    api_base: String,
    api_key: ApiKey,
    client: reqwest::Client,
}

impl GoogleGeolocation {
    pub fn new(api_base: String, api_key: ApiKey) -> Self {
        Self {
            api_base,
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LocationProvider for GoogleGeolocation {
    #[tracing::instrument(skip(self))]
    async fn current_location(&self) -> Result<Coordinates, Error> {
        let url = format!("https://{}/geolocation/v1/geolocate", self.api_base);
        let key = self.api_key.get().await.ok_or_else(invalid_input_error)?;

        let res = self
            .client
            .post(url)
            .query(&[("key", key)])
            .json(&Request { consider_ip: true })
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if status_code == 404 {
            // no position could be derived from the request
            return Err(upstream_error());
        } else if (400..500).contains(&status_code) {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let data: Response = res.json().await?;
        tracing::debug!(accuracy = data.accuracy, "resolved device location");

        to_coordinates(&data).ok_or_else(upstream_error)
    }
}

fn to_coordinates(data: &Response) -> Option<Coordinates> {
    Coordinates::new(data.location.lat, data.location.lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_asks_for_ip_fallback() {
        let body = serde_json::to_value(Request { consider_ip: true }).unwrap();
        assert_eq!(body, serde_json::json!({"considerIp": true}));
    }

    #[test]
    fn response_location_becomes_coordinates() {
        let data: Response = serde_json::from_value(serde_json::json!({
            "location": {"lat": 51.5, "lng": -0.12},
            "accuracy": 1200.0
        }))
        .unwrap();

        assert_eq!(
            to_coordinates(&data),
            Some(Coordinates::new(51.5, -0.12).unwrap())
        );
    }
}
