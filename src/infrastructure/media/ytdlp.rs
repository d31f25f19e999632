use anyhow::Context;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::{application::services::media::MediaExtractor, domain::models::MediaMetadata};

pub const DEFAULT_FORMAT: &str = "best[ext=mp4][vcodec^=avc1][acodec!=none]/best[ext=mp4]";

/// Metadata extraction through the `yt-dlp` binary.
pub struct YtDlpExtractor {
    program: String,
}

impl YtDlpExtractor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args<'a>(url: &'a str, format_preference: &'a str) -> [&'a str; 6] {
        [
            "--dump-single-json",
            "--no-playlist",
            "--no-warnings",
            "-f",
            format_preference,
            url,
        ]
    }
}

#[async_trait]
impl MediaExtractor for YtDlpExtractor {
    async fn extract(&self, url: &str, format_preference: &str) -> anyhow::Result<MediaMetadata> {
        debug!(program = %self.program, %url, "running extractor");

        let output = Command::new(&self.program)
            .args(Self::args(url, format_preference))
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("failed to spawn {}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("{} exited with {}: {}", self.program, output.status, stderr.trim());
        }

        serde_json::from_slice(&output.stdout).context("extractor printed malformed metadata")
    }
}
