mod config;
mod db;
mod departments;
mod documents;
mod errors;
mod layout;
mod models;
mod personnel;
mod render;
mod response;
mod routes;
mod state;
mod visits;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::documents::Letterhead;
use crate::routes::build_router;
use crate::state::AppState;
use crate::visits::cleanup::spawn_visit_cleanup;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort start-up
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Registry API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite and bring the schema up to date
    let db = create_pool(&config.database_url).await?;
    init_schema(&db).await?;

    // Purge yesterday's visitor log now and on every interval
    spawn_visit_cleanup(db.clone(), config.visit_cleanup_interval);
    info!(
        "Visit cleanup scheduled every {}s",
        config.visit_cleanup_interval.as_secs()
    );
    info!("Certificate justification: {:?}", config.justify_strategy);

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        letterhead: Letterhead::default(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the front-end host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
