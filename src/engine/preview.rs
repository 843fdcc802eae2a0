use crate::entities::{
    Bounds, Coordinates, EdgePadding, NavigationRequest, Route, RouteSummary, Stop, Viewport,
};
use crate::error::Error;
use crate::external::{DirectionsProvider, LocationProvider};

/// Extra room at the bottom keeps the path clear of the launch controls.
pub const PREVIEW_PADDING: EdgePadding = EdgePadding {
    top: 80.0,
    left: 40.0,
    bottom: 180.0,
    right: 40.0,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    pub summary: RouteSummary,
    pub route: Option<Route>,
}

impl Preview {
    pub fn unavailable() -> Self {
        Self {
            summary: RouteSummary::Unavailable,
            route: None,
        }
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.route.as_ref().and_then(|r| fit(&r.path))
    }
}

/// Queries a route from origin to destination. Waypoints are left out on
/// purpose; they only matter once an external app takes over. A
/// current-location origin is resolved through `location` first.
///
/// Failures never escape: the preview is advisory and must not block a launch.
#[tracing::instrument(skip_all, fields(mode = request.travel_mode.name()))]
pub async fn preview<D, L>(directions: &D, location: &L, request: &NavigationRequest) -> Preview
where
    D: DirectionsProvider + ?Sized + Sync,
    L: LocationProvider + ?Sized + Sync,
{
    let origin = match resolve_origin(location, &request.origin).await {
        Ok(origin) => origin,
        Err(err) => {
            tracing::warn!(?err, "device location unavailable");
            return Preview::unavailable();
        }
    };

    let result = directions
        .calculate_route(&origin, &request.destination, request.travel_mode)
        .await;

    match result {
        Ok(Some(route)) => Preview {
            summary: RouteSummary::from_route(&route),
            route: Some(route),
        },
        Ok(None) => {
            tracing::info!("directions provider returned no route");
            Preview::unavailable()
        }
        Err(err) => {
            tracing::warn!(?err, "route preview unavailable");
            Preview::unavailable()
        }
    }
}

async fn resolve_origin<L>(location: &L, origin: &Stop) -> Result<Coordinates, Error>
where
    L: LocationProvider + ?Sized + Sync,
{
    match origin {
        Stop::At(coordinates) => Ok(*coordinates),
        Stop::CurrentLocation => location.current_location().await,
    }
}

/// Bounding box of a path with the preview padding applied.
pub fn fit(path: &[Coordinates]) -> Option<Viewport> {
    let first = path.first()?;

    let (mut south, mut west, mut north, mut east) =
        (first.latitude, first.longitude, first.latitude, first.longitude);

    for point in path.iter().skip(1) {
        south = south.min(point.latitude);
        north = north.max(point.latitude);
        west = west.min(point.longitude);
        east = east.max(point.longitude);
    }

    Some(Viewport {
        bounds: Bounds {
            south_west: Coordinates {
                latitude: south,
                longitude: west,
            },
            north_east: Coordinates {
                latitude: north,
                longitude: east,
            },
        },
        padding: PREVIEW_PADDING,
    })
}
