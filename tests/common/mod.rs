#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use uuid::Uuid;

use viator::config::{ApiKey, DEFAULT_THIRD_PARTY_SCHEME};
use viator::engine::launch::SystemLaunch;
use viator::engine::presenter::Collaborators;
use viator::engine::Engine;
use viator::entities::{Coordinates, PreviewView, Route, TravelMode, Viewport};
use viator::error::{presentation_failure_error, upstream_error, Error};
use viator::external::{
    AppOpener, DirectionsProvider, ImageLoader, LocationProvider, PresentationHost,
};

#[derive(Clone, Debug, PartialEq)]
pub enum HostCall {
    Present(PreviewView),
    RenderRoute(Uuid),
    Summary(Uuid, String),
    Logo(Uuid),
    Dismiss(Uuid),
}

pub struct Recorder<T>(Arc<Mutex<Vec<T>>>);

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self(Arc::new(Mutex::new(vec![])))
    }
}

impl<T: Clone> Recorder<T> {
    pub fn push(&self, item: T) {
        self.0.lock().unwrap().push(item);
    }

    pub fn all(&self) -> Vec<T> {
        self.0.lock().unwrap().clone()
    }
}

pub struct RecordingHost {
    pub calls: Recorder<HostCall>,
    pub fail: bool,
}

impl PresentationHost for RecordingHost {
    fn present(&mut self, view: &PreviewView) -> Result<(), Error> {
        if self.fail {
            return Err(presentation_failure_error());
        }
        self.calls.push(HostCall::Present(view.clone()));
        Ok(())
    }

    fn render_route(&mut self, session_id: Uuid, _: &Route, _: Option<&Viewport>) {
        self.calls.push(HostCall::RenderRoute(session_id));
    }

    fn show_summary(&mut self, session_id: Uuid, text: &str) {
        self.calls.push(HostCall::Summary(session_id, text.into()));
    }

    fn show_logo(&mut self, session_id: Uuid, _: &[u8]) {
        self.calls.push(HostCall::Logo(session_id));
    }

    fn dismiss(&mut self, session_id: Uuid) {
        self.calls.push(HostCall::Dismiss(session_id));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Opened {
    Url(String),
    System(SystemLaunch),
}

pub struct FakeOpener {
    pub installed: bool,
    pub succeed: bool,
    pub opened: Recorder<Opened>,
}

#[async_trait]
impl AppOpener for FakeOpener {
    async fn can_open(&self, _: &str) -> bool {
        self.installed
    }

    async fn open_url(&self, url: &Url) -> bool {
        self.opened.push(Opened::Url(url.to_string()));
        self.succeed
    }

    async fn open_system(&self, launch: &SystemLaunch) -> bool {
        self.opened.push(Opened::System(launch.clone()));
        self.succeed
    }
}

pub struct FakeDirections {
    pub route: Option<Route>,
    pub origins: Recorder<Coordinates>,
}

#[async_trait]
impl DirectionsProvider for FakeDirections {
    async fn calculate_route(
        &self,
        origin: &Coordinates,
        _: &Coordinates,
        _: TravelMode,
    ) -> Result<Option<Route>, Error> {
        self.origins.push(*origin);
        Ok(self.route.clone())
    }
}

pub struct FakeLocation(pub Option<Coordinates>);

#[async_trait]
impl LocationProvider for FakeLocation {
    async fn current_location(&self) -> Result<Coordinates, Error> {
        self.0.ok_or_else(upstream_error)
    }
}

pub struct FakeImages {
    pub image: Option<Vec<u8>>,
    pub requested: Recorder<String>,
}

#[async_trait]
impl ImageLoader for FakeImages {
    async fn load(&self, url: &str) -> Result<Vec<u8>, Error> {
        self.requested.push(url.into());
        self.image.clone().ok_or_else(upstream_error)
    }
}

pub struct Harness {
    pub engine: Engine,
    pub host: Recorder<HostCall>,
    pub opened: Recorder<Opened>,
    pub origins: Recorder<Coordinates>,
    pub images: Recorder<String>,
    pub api_key: ApiKey,
}

pub struct Setup {
    pub third_party_installed: bool,
    pub open_succeeds: bool,
    pub present_fails: bool,
    pub route: Option<Route>,
    pub device_location: Option<Coordinates>,
    pub logo: Option<Vec<u8>>,
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            third_party_installed: true,
            open_succeeds: true,
            present_fails: false,
            route: None,
            device_location: None,
            logo: None,
        }
    }
}

pub fn harness(setup: Setup) -> Harness {
    let host = Recorder::default();
    let opened = Recorder::default();
    let origins = Recorder::default();
    let images = Recorder::default();
    let api_key = ApiKey::default();

    let collaborators = Collaborators {
        directions: Arc::new(FakeDirections {
            route: setup.route,
            origins: origins.clone(),
        }),
        location: Arc::new(FakeLocation(setup.device_location)),
        opener: Arc::new(FakeOpener {
            installed: setup.third_party_installed,
            succeed: setup.open_succeeds,
            opened: opened.clone(),
        }),
        images: Arc::new(FakeImages {
            image: setup.logo,
            requested: images.clone(),
        }),
        host: Box::new(RecordingHost {
            calls: host.clone(),
            fail: setup.present_fails,
        }),
    };

    let engine = Engine::new(
        collaborators,
        api_key.clone(),
        DEFAULT_THIRD_PARTY_SCHEME.into(),
    );

    Harness {
        engine,
        host,
        opened,
        origins,
        images,
        api_key,
    }
}

/// Waits for background work to report back to the host. Returns every host
/// call recorded so far once `done` holds, or panics after a second.
pub async fn wait_for(
    host: &Recorder<HostCall>,
    done: impl Fn(&[HostCall]) -> bool,
) -> Vec<HostCall> {
    for _ in 0..100 {
        let calls = host.all();
        if done(&calls) {
            return calls;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("host calls never settled: {:?}", host.all());
}

pub fn has_summary(calls: &[HostCall]) -> bool {
    calls.iter().any(|c| matches!(c, HostCall::Summary(..)))
}

pub fn presented(calls: &[HostCall]) -> Vec<PreviewView> {
    calls
        .iter()
        .filter_map(|c| match c {
            HostCall::Present(view) => Some(view.clone()),
            _ => None,
        })
        .collect()
}
