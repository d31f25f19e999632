use std::sync::Arc;

use poem_openapi::OpenApi;

use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags},
    mappers::{map_request, map_result},
    requests::SendWhatsAppPayload,
    responses::SendWhatsAppResponse,
};

#[derive(Clone)]
pub struct WhatsAppEndpoints {
    state: Arc<ApiState>,
}

impl WhatsAppEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl WhatsAppEndpoints {
    /// Send a text message, a video link and a location to a WhatsApp number
    #[oai(path = "/send-whatsapp", method = "post", tag = EndpointsTags::WhatsApp)]
    pub async fn send_whatsapp(&self, payload: SendWhatsAppPayload) -> SendWhatsAppResponse {
        let request = map_request(payload.into_inner());
        let result = self.state.send_whatsapp_usecase.execute(request).await;
        map_result(result)
    }
}
