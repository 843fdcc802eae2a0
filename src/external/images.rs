use async_trait::async_trait;

use crate::error::{upstream_error, Error};
use crate::external::ImageLoader;

/// Fetches header logos over HTTP.
#[derive(Clone, Debug, Default)]
pub struct HttpImageLoader {
    client: reqwest::Client,
}

#[async_trait]
impl ImageLoader for HttpImageLoader {
    #[tracing::instrument(skip(self))]
    async fn load(&self, url: &str) -> Result<Vec<u8>, Error> {
        let res = self.client.get(url).send().await?;

        if !res.status().is_success() {
            return Err(upstream_error());
        }

        Ok(res.bytes().await?.to_vec())
    }
}
