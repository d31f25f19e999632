use poem_openapi::{ApiResponse, Object, payload::Json};

use crate::presentation::http::mappers::map_bad_request;

#[derive(Object, Debug)]
pub struct SendResultDto {
    pub success: bool,
    pub message: String,
}

#[derive(Object, Debug)]
pub struct SendErrorDto {
    pub success: bool,
    pub message: String,
    pub error: Option<String>,
}

#[derive(ApiResponse)]
#[oai(bad_request_handler = "map_bad_request")]
pub enum SendWhatsAppResponse {
    #[oai(status = 200)]
    Ok(Json<SendResultDto>),
    #[oai(status = 400)]
    BadRequest(Json<SendResultDto>),
    #[oai(status = 500)]
    InternalError(Json<SendErrorDto>),
}
