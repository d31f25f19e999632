use std::{io::Error, sync::Arc};

use poem::{Server, listener::TcpListener};
use tokio::{main, time::interval};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    application::{
        services::video_resolver::VideoResolver, usecases::send_whatsapp::SendWhatsAppUseCase,
    },
    config::Config,
    infrastructure::{
        media::{http_probe::HttpProbe, ytdlp::YtDlpExtractor},
        messaging::ultramsg::{UltraMsgClient, UltraMsgConfig},
    },
    presentation::http::{build_app, endpoints::root::ApiState, rate_limit::RateLimiter},
};

mod application;
mod config;
mod domain;
mod infrastructure;
mod presentation;

#[main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("whatsapp_relay=info,poem=info")),
        )
        .init();

    let config = Config::try_parse().map_err(Error::other)?;

    let gateway = UltraMsgClient::new(UltraMsgConfig {
        base_url: config.ultramsg_base_url.clone(),
        instance_id: config.ultramsg_instance_id.clone(),
        token: config.ultramsg_token.clone(),
    })
    .map_err(Error::other)?;
    let probe = HttpProbe::new().map_err(Error::other)?;
    let resolver = VideoResolver::new(
        Arc::new(YtDlpExtractor::new(config.ytdlp_path.clone())),
        Arc::new(probe),
        config.video_format.clone(),
    );

    let state = Arc::new(ApiState {
        send_whatsapp_usecase: Arc::new(SendWhatsAppUseCase::new(Arc::new(gateway), resolver)),
    });

    let limiter = Arc::new(RateLimiter::new(
        config.rate_limit_max_requests,
        config.rate_limit_window,
    ));
    spawn_rate_limit_gc(limiter.clone());

    let address = format!("{}:{}", config.host, config.port);
    info!(%address, "starting server");

    Server::new(TcpListener::bind(address))
        .run(build_app(state, limiter))
        .await
}

fn spawn_rate_limit_gc(limiter: Arc<RateLimiter>) {
    tokio::spawn(async move {
        let mut ticker = interval(limiter.window().max(std::time::Duration::from_secs(1)));
        loop {
            ticker.tick().await;
            limiter.gc();
        }
    });
}
