mod coordinates;
mod event;
mod provider;
mod request;
mod route;
mod view;

pub use coordinates::Coordinates;
pub use event::{CloseReason, Event};
pub use provider::{LaunchControl, Provider, ProviderAvailability, Selection};
pub use request::{
    HeaderOptions, NavigationRequest, ProviderPreference, Stop, TravelMode, DEFAULT_TITLE,
};
pub use route::{Route, RouteSummary, SUMMARY_FALLBACK, SUMMARY_PENDING};
pub use view::{Bounds, EdgePadding, PreviewView, Viewport};
