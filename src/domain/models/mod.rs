pub mod message;
pub mod video;

pub use message::{DispatchKind, DispatchPlan, OutboundRequest, compose_body};
pub use video::{MediaFormat, MediaMetadata, VideoSource};
