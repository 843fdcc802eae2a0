//! Collaborators the engine talks to, and the adapters shipped with the binary.

pub mod geolocation;
pub mod google_maps;
pub mod images;
pub mod log_host;
pub mod shell;

use async_trait::async_trait;
use reqwest::Url;
use uuid::Uuid;

use crate::engine::launch::SystemLaunch;
use crate::entities::{Coordinates, PreviewView, Route, TravelMode, Viewport};
use crate::error::Error;

/// Routing backend used for the embedded preview.
#[async_trait]
pub trait DirectionsProvider {
    /// `Ok(None)` when the provider found no route.
    async fn calculate_route(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
        mode: TravelMode,
    ) -> Result<Option<Route>, Error>;
}

/// Resolves where the device is right now.
#[async_trait]
pub trait LocationProvider {
    async fn current_location(&self) -> Result<Coordinates, Error>;
}

/// Opens other applications on the device.
#[async_trait]
pub trait AppOpener {
    async fn can_open(&self, scheme: &str) -> bool;

    /// Returns whether the open call was issued.
    async fn open_url(&self, url: &Url) -> bool;

    async fn open_system(&self, launch: &SystemLaunch) -> bool;
}

/// The UI side. Only ever called from the presenter task.
pub trait PresentationHost {
    fn present(&mut self, view: &PreviewView) -> Result<(), Error>;
    fn render_route(&mut self, session_id: Uuid, route: &Route, viewport: Option<&Viewport>);
    fn show_summary(&mut self, session_id: Uuid, text: &str);
    fn show_logo(&mut self, session_id: Uuid, image: &[u8]);
    fn dismiss(&mut self, session_id: Uuid);
}

#[async_trait]
pub trait ImageLoader {
    async fn load(&self, url: &str) -> Result<Vec<u8>, Error>;
}
