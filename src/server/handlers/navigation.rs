use axum::extract::{Extension, Json};
use axum_macros::debug_handler;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::{DynAPI, InitOptions, Initialized, Started};
use crate::entities::Provider;
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct LaunchParams {
    app: Provider,
}

pub async fn initialize(
    Extension(api): Extension<DynAPI>,
    options: Option<Json<InitOptions>>,
) -> Result<Json<Initialized>, Error> {
    let options = options.map(|Json(o)| o).unwrap_or_default();
    let initialized = api.initialize(options).await?;

    Ok(initialized.into())
}

#[debug_handler]
pub async fn start(
    Extension(api): Extension<DynAPI>,
    Json(options): Json<Value>,
) -> Result<Json<Started>, Error> {
    let started = api.start_navigation(options).await?;

    Ok(started.into())
}

pub async fn close(Extension(api): Extension<DynAPI>) -> Result<Json<Value>, Error> {
    api.close().await?;

    Ok(json!({}).into())
}

pub async fn launch(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<LaunchParams>,
) -> Result<Json<Value>, Error> {
    let launched = api.launch(params.app).await?;

    Ok(json!({ "launched": launched }).into())
}

pub async fn dismiss(Extension(api): Extension<DynAPI>) -> Result<Json<Value>, Error> {
    api.dismiss().await?;

    Ok(json!({}).into())
}
