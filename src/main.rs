use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use kolplay_waitlist::config::Config;
use kolplay_waitlist::routes;
use kolplay_waitlist::state::AppState;
use reqwest::Client;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.json_logs);

    let http_client = Client::builder().timeout(config.upstream_timeout).build()?;

    match &config.upstream {
        Some(target) => info!(upstream = target.kind(), endpoint = %target.endpoint(), "waitlist upstream configured"),
        None => warn!("no waitlist upstream configured; submissions will return mock data"),
    }
    if config.email.api_key.is_none() {
        warn!("RESEND_API_KEY is not set; welcome emails will not be sent");
    }

    let cors = match &config.frontend_origin {
        Some(origin) => CorsLayer::new().allow_origin(origin.parse::<HeaderValue>()?),
        None => CorsLayer::new().allow_origin(Any),
    }
    .allow_methods([Method::GET, Method::POST])
    .allow_headers([CONTENT_TYPE]);

    let addr = config.bind_addr;
    let app = routes::router(AppState::new(config, http_client))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = TcpListener::bind(addr).await?;
    info!("Running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
