use async_trait::async_trait;
use reqwest::Url;
use tokio::process::Command;

use crate::engine::launch::SystemLaunch;
use crate::entities::Stop;
use crate::external::AppOpener;

pub const SYSTEM_MAPS_BASE: &str = "https://www.google.com/maps/dir/?api=1";

/// Desktop opener: hands URLs to a command such as `xdg-open` or `open`.
///
/// Which custom schemes count as installed is configuration, since there is no
/// portable way to ask the OS.
#[derive(Clone, Debug)]
pub struct ShellOpener {
    program: String,
    installed_schemes: Vec<String>,
}

impl ShellOpener {
    pub fn new(program: String, installed_schemes: Vec<String>) -> Self {
        Self {
            program,
            installed_schemes,
        }
    }

    async fn spawn(&self, target: &str) -> bool {
        match Command::new(&self.program).arg(target).status().await {
            Ok(status) if status.success() => true,
            Ok(status) => {
                tracing::warn!(program = %self.program, ?status, "opener exited with failure");
                false
            }
            Err(err) => {
                tracing::warn!(program = %self.program, ?err, "could not run opener");
                false
            }
        }
    }
}

#[async_trait]
impl AppOpener for ShellOpener {
    async fn can_open(&self, scheme: &str) -> bool {
        let scheme = scheme_name(scheme);
        self.installed_schemes
            .iter()
            .any(|s| scheme_name(s).eq_ignore_ascii_case(scheme))
    }

    #[tracing::instrument(skip_all, fields(url = %url))]
    async fn open_url(&self, url: &Url) -> bool {
        self.spawn(url.as_str()).await
    }

    #[tracing::instrument(skip_all)]
    async fn open_system(&self, launch: &SystemLaunch) -> bool {
        self.spawn(&system_launch_url(launch)).await
    }
}

fn scheme_name(scheme: &str) -> &str {
    scheme.split(':').next().unwrap_or(scheme)
}

/// Universal maps directions link for a multi-stop launch. The first stop is
/// the origin, the last the destination, everything between a waypoint.
pub fn system_launch_url(launch: &SystemLaunch) -> String {
    let mut url = String::from(SYSTEM_MAPS_BASE);

    let (origin, rest) = match launch.stops.split_first() {
        Some(split) => split,
        None => return url,
    };
    let (destination, waypoints) = match rest.split_last() {
        Some(split) => split,
        None => (origin, &[][..]),
    };

    if let Stop::At(c) = origin {
        url.push_str(&format!("&origin={}", c));
    }
    if let Stop::At(c) = destination {
        url.push_str(&format!("&destination={}", c));
    }

    let waypoints: Vec<String> = waypoints
        .iter()
        .filter_map(|s| s.coordinates())
        .map(String::from)
        .collect();
    if !waypoints.is_empty() {
        url.push_str(&format!("&waypoints={}", waypoints.join("|")));
    }

    url.push_str(&format!("&travelmode={}", launch.travel_mode.name()));
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Coordinates, TravelMode};

    fn at(lat: f64, lng: f64) -> Stop {
        Stop::At(Coordinates::new(lat, lng).unwrap())
    }

    #[test]
    fn system_url_lists_stops() {
        let launch = SystemLaunch {
            stops: vec![at(1.0, 2.0), at(5.0, 6.0), at(7.0, 8.0), at(3.0, 4.0)],
            travel_mode: TravelMode::Transit,
        };

        assert_eq!(
            system_launch_url(&launch),
            "https://www.google.com/maps/dir/?api=1&origin=1,2&destination=3,4&waypoints=5,6|7,8&travelmode=transit"
        );
    }

    #[test]
    fn system_url_leaves_current_location_to_the_app() {
        let launch = SystemLaunch {
            stops: vec![Stop::CurrentLocation, at(3.0, 4.0)],
            travel_mode: TravelMode::Driving,
        };

        assert_eq!(
            system_launch_url(&launch),
            "https://www.google.com/maps/dir/?api=1&destination=3,4&travelmode=driving"
        );
    }

    #[tokio::test]
    async fn installed_schemes_match_by_name() {
        let opener = ShellOpener::new("true".into(), vec!["comgooglemaps://".into()]);

        assert!(opener.can_open("comgooglemaps://").await);
        assert!(opener.can_open("COMGOOGLEMAPS:").await);
        assert!(!opener.can_open("waze://").await);
    }
}
