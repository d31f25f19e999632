pub mod media;
pub mod messaging;
