pub mod media;
pub mod messenger;
pub mod video_resolver;
