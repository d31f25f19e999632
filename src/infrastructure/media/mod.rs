pub mod http_probe;
pub mod ytdlp;
