use axum::extract::{Extension, Json};

use crate::api::{DynAPI, Installed};
use crate::error::Error;

pub async fn installed(Extension(api): Extension<DynAPI>) -> Result<Json<Installed>, Error> {
    let installed = api.is_provider_installed().await?;

    Ok(installed.into())
}
