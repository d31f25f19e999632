//! In-memory collaborators for tests.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    application::services::{
        media::{MediaExtractor, MediaProbe, ProbeResponse},
        messenger::{GatewayReceipt, WhatsAppGateway},
    },
    domain::{
        models::MediaMetadata,
        value_objects::{Location, PhoneNumber},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Chat { phone: String, body: String },
    Location { phone: String, location: Location },
}

#[derive(Default)]
pub struct RecordingGateway {
    calls: Mutex<Vec<GatewayCall>>,
    fail_chat: bool,
    fail_location: bool,
    panic_on_send: bool,
}

impl RecordingGateway {
    pub fn failing_chat() -> Self {
        Self {
            fail_chat: true,
            ..Self::default()
        }
    }

    pub fn failing_location() -> Self {
        Self {
            fail_location: true,
            ..Self::default()
        }
    }

    pub fn panicking() -> Self {
        Self {
            panic_on_send: true,
            ..Self::default()
        }
    }

    pub async fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl WhatsAppGateway for RecordingGateway {
    async fn send_chat_message(
        &self,
        phone: &PhoneNumber,
        body: &str,
    ) -> anyhow::Result<GatewayReceipt> {
        if self.panic_on_send {
            panic!("gateway exploded");
        }
        self.calls.lock().await.push(GatewayCall::Chat {
            phone: phone.to_string(),
            body: body.to_string(),
        });
        if self.fail_chat {
            anyhow::bail!("gateway rejected chat message");
        }
        Ok(GatewayReceipt {
            id: Some("1".into()),
        })
    }

    async fn send_location(
        &self,
        phone: &PhoneNumber,
        location: &Location,
    ) -> anyhow::Result<GatewayReceipt> {
        self.calls.lock().await.push(GatewayCall::Location {
            phone: phone.to_string(),
            location: location.clone(),
        });
        if self.fail_location {
            anyhow::bail!("gateway rejected location");
        }
        Ok(GatewayReceipt {
            id: Some("2".into()),
        })
    }
}

pub struct StubExtractor {
    metadata: Option<MediaMetadata>,
    calls: Mutex<Vec<(String, String)>>,
}

impl StubExtractor {
    pub fn returning(metadata: MediaMetadata) -> Self {
        Self {
            metadata: Some(metadata),
            calls: Mutex::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            metadata: None,
            calls: Mutex::default(),
        }
    }

    pub async fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl MediaExtractor for StubExtractor {
    async fn extract(&self, url: &str, format_preference: &str) -> anyhow::Result<MediaMetadata> {
        self.calls
            .lock()
            .await
            .push((url.to_string(), format_preference.to_string()));
        self.metadata
            .clone()
            .ok_or_else(|| anyhow::anyhow!("video unavailable"))
    }
}

pub struct StubProbe {
    content_type: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl StubProbe {
    pub fn content_type(content_type: &str) -> Self {
        Self {
            content_type: Some(content_type.to_string()),
            calls: Mutex::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            content_type: None,
            calls: Mutex::default(),
        }
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl MediaProbe for StubProbe {
    async fn head(&self, url: &str) -> anyhow::Result<ProbeResponse> {
        self.calls.lock().await.push(url.to_string());
        match &self.content_type {
            Some(ct) => Ok(ProbeResponse {
                content_type: Some(ct.clone()),
            }),
            None => anyhow::bail!("connection refused"),
        }
    }
}

pub fn compatible_metadata(url: &str) -> MediaMetadata {
    MediaMetadata {
        id: Some("dQw4w9WgXcQ".into()),
        url: Some(url.to_string()),
        ext: Some("mp4".into()),
        vcodec: Some("avc1.64001F".into()),
        acodec: Some("mp4a.40.2".into()),
        formats: Vec::new(),
    }
}
