use async_trait::async_trait;

use crate::domain::models::MediaMetadata;

#[async_trait]
pub trait MediaExtractor: Send + Sync {
    async fn extract(&self, url: &str, format_preference: &str) -> anyhow::Result<MediaMetadata>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResponse {
    pub content_type: Option<String>,
}

impl ProbeResponse {
    pub fn is_video(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("video/"))
    }
}

#[async_trait]
pub trait MediaProbe: Send + Sync {
    async fn head(&self, url: &str) -> anyhow::Result<ProbeResponse>;
}
