use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{invalid_input_error, Error};

pub const DEFAULT_API_BASE: &str = "maps.googleapis.com";
pub const DEFAULT_GEOLOCATION_API_BASE: &str = "www.googleapis.com";
pub const DEFAULT_THIRD_PARTY_SCHEME: &str = "comgooglemaps://";
pub const DEFAULT_OPEN_COMMAND: &str = "xdg-open";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Runtime settings, read from the process environment (and `.env` if present).
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base: String,
    pub geolocation_api_base: String,
    pub api_key: Option<String>,
    pub third_party_scheme: String,
    pub installed_schemes: Vec<String>,
    pub open_command: String,
    pub listen_addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            geolocation_api_base: DEFAULT_GEOLOCATION_API_BASE.into(),
            api_key: None,
            third_party_scheme: DEFAULT_THIRD_PARTY_SCHEME.into(),
            installed_schemes: vec![],
            open_command: DEFAULT_OPEN_COMMAND.into(),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

impl Config {
    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        if dotenv::dotenv().is_err() {
            tracing::debug!("no .env file found, using process environment only");
        }

        let listen_addr = var_or("VIATOR_LISTEN_ADDR", DEFAULT_LISTEN_ADDR)
            .parse()
            .map_err(|_| invalid_input_error())?;

        let installed_schemes = env::var("VIATOR_INSTALLED_SCHEMES")
            .map(|value| parse_list(&value))
            .unwrap_or_default();

        Ok(Self {
            api_base: var_or("GOOGLE_MAPS_API_BASE", DEFAULT_API_BASE),
            geolocation_api_base: var_or(
                "GOOGLE_GEOLOCATION_API_BASE",
                DEFAULT_GEOLOCATION_API_BASE,
            ),
            api_key: env::var("GOOGLE_MAPS_API_KEY").ok().filter(|k| !k.is_empty()),
            third_party_scheme: var_or("VIATOR_THIRD_PARTY_SCHEME", DEFAULT_THIRD_PARTY_SCHEME),
            installed_schemes,
            open_command: var_or("VIATOR_OPEN_COMMAND", DEFAULT_OPEN_COMMAND),
            listen_addr,
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.into())
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// API key shared between `initialize` and the providers that need one.
#[derive(Clone, Debug, Default)]
pub struct ApiKey(Arc<RwLock<Option<String>>>);

impl ApiKey {
    pub fn new(initial: Option<String>) -> Self {
        Self(Arc::new(RwLock::new(initial)))
    }

    pub async fn set(&self, key: String) {
        *self.0.write().await = Some(key);
    }

    pub async fn get(&self) -> Option<String> {
        self.0.read().await.clone()
    }
}
