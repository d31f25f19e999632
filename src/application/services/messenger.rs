use async_trait::async_trait;

use crate::domain::value_objects::{Location, PhoneNumber};

/// Acknowledgement returned by the gateway for an accepted message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayReceipt {
    pub id: Option<String>,
}

#[async_trait]
pub trait WhatsAppGateway: Send + Sync {
    async fn send_chat_message(
        &self,
        phone: &PhoneNumber,
        body: &str,
    ) -> anyhow::Result<GatewayReceipt>;

    async fn send_location(
        &self,
        phone: &PhoneNumber,
        location: &Location,
    ) -> anyhow::Result<GatewayReceipt>;
}
