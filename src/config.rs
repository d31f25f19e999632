use std::env::var;
use std::time::Duration;

use dotenvy::dotenv;

use crate::infrastructure::{
    media::ytdlp::DEFAULT_FORMAT, messaging::ultramsg::DEFAULT_BASE_URL,
};

pub struct Config {
    pub host: String,
    pub port: u16,
    pub ultramsg_base_url: String,
    pub ultramsg_instance_id: String,
    pub ultramsg_token: String,
    pub ytdlp_path: String,
    pub video_format: String,
    pub rate_limit_max_requests: u64,
    pub rate_limit_window: Duration,
}

impl Config {
    pub fn try_parse() -> Result<Config, &'static str> {
        let _ = dotenv();
        Self::from_lookup(|key| var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, &'static str> {
        let required = |key: &str, missing: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(missing)
        };
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            host: or_default("HOST", "0.0.0.0"),
            port: or_default("PORT", "3000")
                .parse::<u16>()
                .map_err(|_| "An error occured while parsing PORT env param")?,
            ultramsg_base_url: or_default("ULTRAMSG_BASE_URL", DEFAULT_BASE_URL),
            ultramsg_instance_id: required(
                "ULTRAMSG_INSTANCE_ID",
                "An error occured while getting ULTRAMSG_INSTANCE_ID env param",
            )?,
            ultramsg_token: required(
                "ULTRAMSG_API_TOKEN",
                "An error occured while getting ULTRAMSG_API_TOKEN env param",
            )?,
            ytdlp_path: or_default("YTDLP_PATH", "yt-dlp"),
            video_format: or_default("VIDEO_FORMAT", DEFAULT_FORMAT),
            rate_limit_max_requests: or_default("RATE_LIMIT_MAX_REQUESTS", "100")
                .parse::<u64>()
                .map_err(|_| "An error occured while parsing RATE_LIMIT_MAX_REQUESTS env param")?,
            rate_limit_window: Duration::from_secs(
                or_default("RATE_LIMIT_WINDOW_SECS", "900")
                    .parse::<u64>()
                    .map_err(|_| "An error occured while parsing RATE_LIMIT_WINDOW_SECS env param")?,
            ),
        })
    }
}
