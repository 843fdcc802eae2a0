use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Coordinates, HeaderOptions, Selection, Stop};

/// Everything the host needs to lay out the preview screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreviewView {
    pub session_id: Uuid,
    pub title: String,
    pub header: HeaderOptions,
    pub origin: Stop,
    pub destination: Coordinates,
    pub waypoints: Vec<Coordinates>,
    pub controls: Selection,
    pub summary: String,
    pub simulate: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgePadding {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub bounds: Bounds,
    pub padding: EdgePadding,
}
