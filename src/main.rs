use std::sync::Arc;

use viator::config::{ApiKey, Config};
use viator::engine::presenter::Collaborators;
use viator::engine::Engine;
use viator::external::{
    geolocation::GoogleGeolocation, google_maps::GoogleMaps, images::HttpImageLoader,
    log_host::LogHost, shell::ShellOpener,
};
use viator::server::serve;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "invalid configuration");
            std::process::exit(1);
        }
    };

    let api_key = ApiKey::new(config.api_key.clone());

    let collaborators = Collaborators {
        directions: Arc::new(GoogleMaps::new(config.api_base.clone(), api_key.clone())),
        location: Arc::new(GoogleGeolocation::new(
            config.geolocation_api_base.clone(),
            api_key.clone(),
        )),
        opener: Arc::new(ShellOpener::new(
            config.open_command.clone(),
            config.installed_schemes.clone(),
        )),
        images: Arc::new(HttpImageLoader::default()),
        host: Box::new(LogHost),
    };

    let engine = Engine::new(collaborators, api_key, config.third_party_scheme.clone());

    serve(engine, config.listen_addr).await;
}
