pub mod endpoints;
pub mod mappers;
pub mod rate_limit;
pub mod requests;
pub mod responses;

use std::{any::Any, sync::Arc};

use poem::{
    Endpoint, EndpointExt, IntoResponse, Response, Route,
    middleware::{CatchPanic, Tracing},
};
use poem_openapi::OpenApiService;
use tracing::error;

use crate::presentation::http::{
    endpoints::{health::HealthEndpoints, root::ApiState, whatsapp::WhatsAppEndpoints},
    mappers::internal_error,
    rate_limit::{RateLimit, RateLimiter},
};

/// `/api` carries the service, `/` the Swagger UI.
pub fn build_app(state: Arc<ApiState>, limiter: Arc<RateLimiter>) -> impl Endpoint {
    let api_service = OpenApiService::new(
        (HealthEndpoints, WhatsAppEndpoints::new(state)),
        "WhatsApp Relay API",
        env!("CARGO_PKG_VERSION"),
    )
    .server("/api");
    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/api", api_service.with(RateLimit::new(limiter)))
        .nest("/", ui)
        .with(Tracing)
        .with(CatchPanic::new().with_handler(panic_response))
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    error!(%detail, "request handler panicked");
    internal_error(None).into_response()
}
