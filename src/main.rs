mod config;
mod db;
mod models;
mod routes;
mod services;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::services::fetcher::PageFetcher;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub pool: SqlitePool,
    pub fetcher: PageFetcher,
    pub start_time: Instant,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "titleplay_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = Config::from_env();
    let port = config.port;

    tracing::info!("Starting TitlePlay Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.node_env);

    // Open the settings database
    let pool = create_pool(&config).await?;
    tracing::info!("Settings database opened");

    // Run database migrations
    run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Title page fetcher
    let fetcher = PageFetcher::new(&config.user_agent, config.fetch_timeout_ms);
    tracing::info!("Page fetcher initialized");

    // Build application state
    let state = Arc::new(AppState {
        config,
        pool,
        fetcher,
        start_time: Instant::now(),
    });

    // Build router
    let app = Router::new()
        // Health endpoints
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::health::metrics))
        // Resolution and playback
        .route("/api/resolve", post(routes::resolve::resolve_page))
        .route("/api/play", post(routes::play::start_playback))
        .route("/launch", get(routes::play::launch))
        // Provider configuration
        .route(
            "/api/providers",
            get(routes::providers::get_providers).put(routes::providers::replace_providers),
        )
        .route(
            "/api/providers/default",
            put(routes::providers::set_default_provider),
        )
        .route(
            "/api/providers/reset",
            post(routes::providers::reset_providers),
        )
        .route(
            "/api/providers/:index",
            delete(routes::providers::delete_provider),
        )
        // Watch progress
        .route(
            "/api/progress/:series_id",
            get(routes::progress::get_progress)
                .put(routes::progress::put_progress)
                .delete(routes::progress::delete_progress),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
