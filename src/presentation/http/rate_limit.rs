//! Per-client rate limiting middleware

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use poem::{
    Endpoint, IntoResponse, Middleware, Request, Response, http::StatusCode, web::Json,
};
use serde_json::json;
use tracing::warn;

pub const RATE_LIMITED_MESSAGE: &str = "Too many requests, please try again later.";

struct ClientState {
    count: u64,
    window_start: Instant,
}

/// Fixed-window limiter: each client gets `max_requests` per `window`.
pub struct RateLimiter {
    clients: DashMap<String, ClientState>,
    max_requests: u64,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u64, window: Duration) -> Self {
        Self {
            clients: DashMap::new(),
            max_requests,
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Counts the request and returns `true` if it is within the limit.
    pub fn check(&self, client_key: &str) -> bool {
        let now = Instant::now();

        let mut entry = self
            .clients
            .entry(client_key.to_string())
            .or_insert_with(|| ClientState {
                count: 0,
                window_start: now,
            });

        if now.duration_since(entry.window_start) >= self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count < self.max_requests {
            entry.count += 1;
            true
        } else {
            false
        }
    }

    /// Drops clients whose window has long expired.
    pub fn gc(&self) {
        let now = Instant::now();
        self.clients
            .retain(|_, state| now.duration_since(state.window_start) < self.window * 2);
    }

    fn len(&self) -> usize {
        self.clients.len()
    }
}

pub struct RateLimit {
    limiter: Arc<RateLimiter>,
}

impl RateLimit {
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<E: Endpoint> Middleware<E> for RateLimit {
    type Output = RateLimitEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        RateLimitEndpoint {
            inner: ep,
            limiter: self.limiter.clone(),
        }
    }
}

pub struct RateLimitEndpoint<E> {
    inner: E,
    limiter: Arc<RateLimiter>,
}

impl<E: Endpoint> Endpoint for RateLimitEndpoint<E> {
    type Output = Response;

    async fn call(&self, req: Request) -> poem::Result<Self::Output> {
        let client = client_key(&req);
        if !self.limiter.check(&client) {
            warn!(%client, tracked = self.limiter.len(), "rate limit exceeded");
            return Ok(Json(json!({ "success": false, "message": RATE_LIMITED_MESSAGE }))
                .with_status(StatusCode::TOO_MANY_REQUESTS)
                .into_response());
        }

        self.inner.call(req).await.map(IntoResponse::into_response)
    }
}

fn client_key(req: &Request) -> String {
    let remote = req.remote_addr();
    remote
        .as_socket_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| remote.to_string())
}
