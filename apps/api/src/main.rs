mod acquisition;
mod config;
mod errors;
mod extraction;
mod jobs;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::sync::HttpJobFeed;
use crate::jobs::{JobFeed, JobStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume extractor API v{}", env!("CARGO_PKG_VERSION"));

    let job_store = Arc::new(JobStore::open(config.jobs_store_path.clone())?);
    match &config.jobs_store_path {
        Some(path) => info!("Job store backed by {}", path.display()),
        None => info!("Job store is in-memory only"),
    }

    let job_feed: Option<Arc<dyn JobFeed>> = config
        .jobs_feed_url
        .clone()
        .map(|url| Arc::new(HttpJobFeed::new(url)) as Arc<dyn JobFeed>);
    if job_feed.is_none() {
        info!("No JOBS_FEED_URL configured; remote sync disabled");
    }

    let state = AppState {
        config: config.clone(),
        job_store,
        job_feed,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
