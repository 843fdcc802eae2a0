use uuid::Uuid;

use crate::entities::{PreviewView, Provider, Route, Viewport};
use crate::error::Error;
use crate::external::PresentationHost;

/// Headless host for the HTTP bridge: writes every UI call to the log.
#[derive(Debug, Default)]
pub struct LogHost;

impl PresentationHost for LogHost {
    fn present(&mut self, view: &PreviewView) -> Result<(), Error> {
        tracing::info!(
            session_id = %view.session_id,
            title = %view.title,
            primary = view.controls.primary.provider.name(),
            third_party_enabled = view
                .controls
                .control(Provider::ThirdParty)
                .map(|c| c.enabled)
                .unwrap_or(false),
            "present preview"
        );
        Ok(())
    }

    fn render_route(&mut self, session_id: Uuid, route: &Route, viewport: Option<&Viewport>) {
        tracing::info!(%session_id, points = route.path.len(), ?viewport, "render route");
    }

    fn show_summary(&mut self, session_id: Uuid, text: &str) {
        tracing::info!(%session_id, %text, "route summary");
    }

    fn show_logo(&mut self, session_id: Uuid, image: &[u8]) {
        tracing::info!(%session_id, bytes = image.len(), "header logo");
    }

    fn dismiss(&mut self, session_id: Uuid) {
        tracing::info!(%session_id, "dismiss preview");
    }
}
