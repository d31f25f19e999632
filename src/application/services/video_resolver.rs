use std::sync::Arc;

use tracing::debug;

use crate::{
    application::{
        pipeline::Step,
        services::media::{MediaExtractor, MediaProbe},
    },
    domain::models::VideoSource,
};

pub struct VideoResolver {
    extractor: Arc<dyn MediaExtractor>,
    probe: Arc<dyn MediaProbe>,
    format_preference: String,
}

impl VideoResolver {
    pub fn new(
        extractor: Arc<dyn MediaExtractor>,
        probe: Arc<dyn MediaProbe>,
        format_preference: impl Into<String>,
    ) -> Self {
        Self {
            extractor,
            probe,
            format_preference: format_preference.into(),
        }
    }

    /// Turns a caller-supplied link into a URL the gateway can play.
    /// Every failure degrades to `None`.
    pub async fn resolve(&self, video_url: Option<&str>) -> Step<Option<String>> {
        let Some(raw) = video_url.map(str::trim).filter(|u| !u.is_empty()) else {
            return Step::Ok(None);
        };

        let source = match VideoSource::classify(raw) {
            Ok(source) => source,
            Err(err) => return Step::degraded(None, err.to_string()),
        };

        match source {
            VideoSource::Platform { video_id } => {
                debug!(%video_id, "extracting platform video");
                self.resolve_platform(raw).await
            }
            VideoSource::DirectFile => self.resolve_direct(raw).await,
        }
    }

    async fn resolve_platform(&self, url: &str) -> Step<Option<String>> {
        let metadata = match self.extractor.extract(url, &self.format_preference).await {
            Ok(metadata) => metadata,
            Err(err) => return Step::degraded(None, format!("metadata extraction failed: {err:#}")),
        };

        match metadata.playable_url() {
            Some(playable) => Step::Ok(Some(playable.to_string())),
            None => Step::degraded(
                None,
                format!(
                    "no mp4/h264 format available for {}",
                    metadata.id.as_deref().unwrap_or(url)
                ),
            ),
        }
    }

    async fn resolve_direct(&self, url: &str) -> Step<Option<String>> {
        match self.probe.head(url).await {
            Ok(response) if response.is_video() => Step::Ok(Some(url.to_string())),
            Ok(response) => Step::degraded(
                None,
                format!(
                    "not a video: content type {}",
                    response.content_type.as_deref().unwrap_or("missing")
                ),
            ),
            Err(err) => Step::degraded(None, format!("probe failed: {err:#}")),
        }
    }
}
