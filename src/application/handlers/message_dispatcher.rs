use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::{
    application::services::messenger::WhatsAppGateway,
    domain::models::{DispatchKind, DispatchPlan},
};

#[derive(Debug, Error)]
#[error("{kind} dispatch failed")]
pub struct DispatchError {
    pub kind: DispatchKind,
    #[source]
    pub source: anyhow::Error,
}

pub struct MessageDispatchHandler {
    gateway: Arc<dyn WhatsAppGateway>,
}

impl MessageDispatchHandler {
    pub fn new(gateway: Arc<dyn WhatsAppGateway>) -> Self {
        Self { gateway }
    }

    /// Sends the chat body, then the location. The first failure stops the
    /// plan; the location is never sent after a failed chat message.
    pub async fn handle(&self, plan: &DispatchPlan) -> Result<Vec<DispatchKind>, DispatchError> {
        let mut dispatched = Vec::with_capacity(2);
        let recipient = plan.phone.masked();

        if let Some(body) = plan.chat_body.as_deref() {
            let receipt = self
                .gateway
                .send_chat_message(&plan.phone, body)
                .await
                .map_err(|source| fail(DispatchKind::Chat, &recipient, source))?;
            info!(%recipient, id = ?receipt.id, "chat message sent");
            dispatched.push(DispatchKind::Chat);
        }

        if let Some(location) = plan.location.as_ref() {
            let receipt = self
                .gateway
                .send_location(&plan.phone, location)
                .await
                .map_err(|source| fail(DispatchKind::Location, &recipient, source))?;
            info!(%recipient, id = ?receipt.id, "location sent");
            dispatched.push(DispatchKind::Location);
        }

        Ok(dispatched)
    }
}

fn fail(kind: DispatchKind, recipient: &str, source: anyhow::Error) -> DispatchError {
    let detail = format!("{source:#}");
    error!(%kind, %recipient, error = %detail, "gateway dispatch failed");
    DispatchError { kind, source }
}
