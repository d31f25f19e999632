use std::sync::Arc;

use poem_openapi::Tags;

use crate::application::usecases::send_whatsapp::SendWhatsAppUseCase;

#[derive(Clone)]
pub struct ApiState {
    pub send_whatsapp_usecase: Arc<SendWhatsAppUseCase>,
}

/// Enum of API sections (tags)
#[derive(Tags)]
pub enum EndpointsTags {
    Health,
    WhatsApp,
}
