mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::api::{DynAPI, API};
use crate::server::handlers::{events, navigation, providers};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/initialize", post(navigation::initialize))
        .route("/navigation/start", post(navigation::start))
        .route("/navigation/close", post(navigation::close))
        .route("/navigation/launch", post(navigation::launch))
        .route("/navigation/dismiss", post(navigation::dismiss))
        .route("/providers/installed", get(providers::installed))
        .route("/events", get(events::stream))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) {
    let api = Arc::new(api) as DynAPI;
    let app = router(api);

    tracing::info!("listening on {}", addr);

    if let Err(err) = axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!(?err, "server stopped");
    }
}
