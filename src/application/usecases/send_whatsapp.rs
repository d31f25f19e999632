use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    application::{
        handlers::message_dispatcher::{DispatchError, MessageDispatchHandler},
        pipeline::{self, Step},
        services::{messenger::WhatsAppGateway, video_resolver::VideoResolver},
    },
    domain::{
        errors::DomainError,
        models::{DispatchKind, DispatchPlan, OutboundRequest, compose_body},
    },
};

#[derive(Debug, Error)]
pub enum SendWhatsAppError {
    #[error(transparent)]
    Rejected(#[from] DomainError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendWhatsAppResponse {
    pub dispatched: Vec<DispatchKind>,
}

pub struct SendWhatsAppUseCase {
    resolver: VideoResolver,
    dispatcher: MessageDispatchHandler,
}

impl SendWhatsAppUseCase {
    pub fn new(gateway: Arc<dyn WhatsAppGateway>, resolver: VideoResolver) -> Self {
        Self {
            resolver,
            dispatcher: MessageDispatchHandler::new(gateway),
        }
    }

    pub async fn execute(
        &self,
        request: OutboundRequest,
    ) -> Result<SendWhatsAppResponse, SendWhatsAppError> {
        let phone = accept("phone", pipeline::validate_phone(request.phone.as_deref()))?;
        let video_url = accept("video", self.resolver.resolve(request.video_url.as_deref()).await)?;
        let location = accept("location", pipeline::parse_location(&request))?;

        let plan = DispatchPlan {
            chat_body: compose_body(request.message.as_deref(), video_url.as_deref()),
            phone,
            location,
        };

        if plan.is_empty() {
            info!(recipient = %plan.phone.masked(), "nothing to dispatch");
        }

        let dispatched = self.dispatcher.handle(&plan).await?;
        Ok(SendWhatsAppResponse { dispatched })
    }
}

fn accept<T>(stage: &'static str, step: Step<T>) -> Result<T, DomainError> {
    let (value, reason) = step.into_result()?;
    if let Some(reason) = reason {
        warn!(stage, %reason, "continuing without optional input");
    }
    Ok(value)
}
