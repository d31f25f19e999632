use serde::Deserialize;
use url::Url;

use crate::domain::errors::DomainError;

const SHORT_LINK_HOST: &str = "youtu.be";
const LONG_FORM_HOSTS: [&str; 3] = ["youtube.com", "www.youtube.com", "m.youtube.com"];
const ID_PATH_PREFIXES: [&str; 3] = ["shorts", "embed", "live"];

/// Where a video link points, decided from the URL alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// A YouTube page that must go through metadata extraction.
    Platform { video_id: String },
    /// Anything else; assumed to be a media file.
    DirectFile,
}

impl VideoSource {
    pub fn classify(raw: &str) -> Result<Self, DomainError> {
        let url = Url::parse(raw.trim())
            .map_err(|err| DomainError::InvalidVideoUrl(format!("{raw}: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidVideoUrl(format!(
                "{raw}: unsupported scheme {}",
                url.scheme()
            )));
        }

        match platform_video_id(&url) {
            Some(video_id) => Ok(VideoSource::Platform { video_id }),
            None => Ok(VideoSource::DirectFile),
        }
    }
}

fn platform_video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_ascii_lowercase();
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let id = if host == SHORT_LINK_HOST {
        segments.next().map(str::to_string)
    } else if LONG_FORM_HOSTS.contains(&host.as_str()) {
        match segments.next() {
            Some("watch") => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            Some(prefix) if ID_PATH_PREFIXES.contains(&prefix) => {
                segments.next().map(str::to_string)
            }
            _ => None,
        }
    } else {
        None
    };

    id.filter(|id| !id.is_empty())
}

/// Subset of the metadata document printed by `yt-dlp --dump-single-json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaMetadata {
    pub id: Option<String>,
    pub url: Option<String>,
    pub ext: Option<String>,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
    #[serde(default)]
    pub formats: Vec<MediaFormat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaFormat {
    pub url: Option<String>,
    pub ext: Option<String>,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
}

impl MediaMetadata {
    /// The selected format when it is MP4/H.264 with audio, otherwise the
    /// best such entry in `formats` (yt-dlp lists them worst first).
    pub fn playable_url(&self) -> Option<&str> {
        if is_compatible(self.ext.as_deref(), self.vcodec.as_deref(), self.acodec.as_deref()) {
            if let Some(url) = self.url.as_deref() {
                return Some(url);
            }
        }

        self.formats
            .iter()
            .rev()
            .filter(|f| is_compatible(f.ext.as_deref(), f.vcodec.as_deref(), f.acodec.as_deref()))
            .find_map(|f| f.url.as_deref())
    }
}

fn is_compatible(ext: Option<&str>, vcodec: Option<&str>, acodec: Option<&str>) -> bool {
    let h264 = vcodec.is_some_and(|c| c.starts_with("avc1") || c.starts_with("h264"));
    let has_audio = acodec.is_some_and(|c| c != "none");
    ext == Some("mp4") && h264 && has_audio
}
