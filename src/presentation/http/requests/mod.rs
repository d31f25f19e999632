use poem_openapi::{
    ApiRequest, Object,
    payload::{Form, Json},
};
use serde::Deserialize;
use serde_json::Value;

/// Coordinates are accepted as JSON strings or numbers.
#[derive(Object, Deserialize, Debug, Default)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct SendWhatsAppRequestDto {
    pub phone: Option<String>,
    pub message: Option<String>,
    pub video_url: Option<String>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub address: Option<String>,
}

#[derive(ApiRequest)]
pub enum SendWhatsAppPayload {
    Json(Json<SendWhatsAppRequestDto>),
    Form(Form<SendWhatsAppRequestDto>),
}

impl SendWhatsAppPayload {
    pub fn into_inner(self) -> SendWhatsAppRequestDto {
        match self {
            SendWhatsAppPayload::Json(Json(dto)) => dto,
            SendWhatsAppPayload::Form(Form(dto)) => dto,
        }
    }
}
