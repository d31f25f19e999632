use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};

use crate::application::services::media::{MediaProbe, ProbeResponse};

/// Reads a URL's `Content-Type` with a `HEAD` request.
pub struct HttpProbe {
    http: Client,
}

impl HttpProbe {
    pub fn new() -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("whatsapp-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build probe http client")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl MediaProbe for HttpProbe {
    async fn head(&self, url: &str) -> anyhow::Result<ProbeResponse> {
        let response = self
            .http
            .head(url)
            .send()
            .await
            .with_context(|| format!("HEAD {url} failed"))?
            .error_for_status()?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(ProbeResponse { content_type })
    }
}
