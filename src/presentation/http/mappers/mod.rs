use poem_openapi::payload::Json;
use serde_json::Value;
use tracing::debug;

use crate::{
    application::usecases::send_whatsapp::{SendWhatsAppError, SendWhatsAppResponse as Sent},
    domain::models::OutboundRequest,
    presentation::http::{
        requests::SendWhatsAppRequestDto,
        responses::{SendErrorDto, SendResultDto, SendWhatsAppResponse},
    },
};

pub const SENT_MESSAGE: &str = "WhatsApp message sent successfully";
pub const FAILED_MESSAGE: &str = "Failed to send WhatsApp message";

pub fn map_request(dto: SendWhatsAppRequestDto) -> OutboundRequest {
    OutboundRequest {
        phone: dto.phone,
        message: dto.message,
        video_url: dto.video_url,
        latitude: coordinate(dto.latitude),
        longitude: coordinate(dto.longitude),
        address: dto.address,
    }
}

fn coordinate(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

pub fn map_result(result: Result<Sent, SendWhatsAppError>) -> SendWhatsAppResponse {
    match result {
        Ok(sent) => {
            debug!(dispatched = ?sent.dispatched, "request completed");
            SendWhatsAppResponse::Ok(Json(SendResultDto {
                success: true,
                message: SENT_MESSAGE.to_string(),
            }))
        }
        Err(SendWhatsAppError::Rejected(err)) => {
            SendWhatsAppResponse::BadRequest(Json(SendResultDto {
                success: false,
                message: err.to_string(),
            }))
        }
        Err(SendWhatsAppError::Dispatch(err)) => internal_error(Some(err.to_string())),
    }
}

pub fn internal_error(error: Option<String>) -> SendWhatsAppResponse {
    SendWhatsAppResponse::InternalError(Json(SendErrorDto {
        success: false,
        message: FAILED_MESSAGE.to_string(),
        error,
    }))
}

/// Body that could not be parsed into a request.
pub fn map_bad_request(err: poem::Error) -> SendWhatsAppResponse {
    debug!(error = %err, "rejecting malformed request body");
    SendWhatsAppResponse::BadRequest(Json(SendResultDto {
        success: false,
        message: format!("Invalid request: {err}"),
    }))
}
