use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;

use crate::entities::{Event, Provider};
use crate::error::Error;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitOptions {
    pub api_key: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Initialized {
    pub ok: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Started {
    pub started: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Installed {
    pub installed: bool,
}

/// Operations exposed to the host bridge.
#[async_trait]
pub trait NavigationAPI {
    async fn initialize(&self, options: InitOptions) -> Result<Initialized, Error>;
    async fn start_navigation(&self, options: Value) -> Result<Started, Error>;
    async fn close(&self) -> Result<(), Error>;
    async fn is_provider_installed(&self) -> Result<Installed, Error>;
    fn subscribe(&self) -> broadcast::Receiver<Event>;
}

/// Callbacks from the preview screen's own controls.
#[async_trait]
pub trait HostAPI {
    /// Returns whether the app was opened and the session handed off.
    async fn launch(&self, app: Provider) -> Result<bool, Error>;
    async fn dismiss(&self) -> Result<(), Error>;
}

pub trait API: NavigationAPI + HostAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
