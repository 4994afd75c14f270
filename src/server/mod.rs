//! HTTP server
//!
//! Routes:
//! - `/health` - liveness check
//! - `/interviews/:slug`, `/cases/:slug` - rendered detail pages
//! - `/sitemap.xml` - sitemap of public pages
//! - `/api/*` - public JSON API (home sections, listings, preview, quote requests)
//! - `/admin/*` - admin API, bearer token required
//! - `/static/site.css` and the public upload directory

mod admin;
mod error;
mod public;
pub mod request;

use crate::models::{SiteConfig, SiteSection};
use crate::services::{
    AdminService, AuthGuard, BlobStore, ContentService, FsBlobStore, MemoryStore, QuoteService,
    RateLimiter, RecordStore, StaticTokenGuard,
};
use crate::Result;
use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Request bodies carry base64 attachments and raw images
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

// =============================================================================
// Application State
// =============================================================================

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentService>,
    pub quotes: Arc<QuoteService>,
    pub admin: Arc<AdminService>,
    pub site: Arc<SiteSection>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        blobs: Arc<dyn BlobStore>,
        guard: Arc<dyn AuthGuard>,
        limiter: Arc<RateLimiter>,
        site: SiteSection,
    ) -> Self {
        Self {
            content: Arc::new(ContentService::new(store.clone())),
            quotes: Arc::new(QuoteService::new(store.clone(), blobs.clone(), limiter)),
            admin: Arc::new(AdminService::new(store, blobs, guard)),
            site: Arc::new(site),
        }
    }
}

// =============================================================================
// Router
// =============================================================================

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(public::health_check))
        .route("/static/site.css", get(public::serve_styles))
        .route("/sitemap.xml", get(public::sitemap))
        .route("/interviews/:slug", get(public::interview_page))
        .route("/cases/:slug", get(public::case_page))
        .route("/api/home", get(public::home))
        .route("/api/about", get(public::about))
        .route("/api/interviews", get(public::list_interviews))
        .route("/api/interviews/preview", post(public::preview_interview))
        .route("/api/cases", get(public::list_cases))
        .route("/api/quotes", post(public::submit_quote))
        .route("/api/:resource", get(public::list_section))
        .route("/admin/api/:resource", post(admin::create_record))
        .route(
            "/admin/api/:resource/:id",
            put(admin::update_record).delete(admin::delete_record),
        )
        .route("/admin/uploads/:bucket", post(admin::upload_image))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// =============================================================================
// Server Startup
// =============================================================================

/// Start the site server and run until Ctrl+C
pub async fn start_server(config: SiteConfig) -> Result<()> {
    let storage = &config.storage;
    let store = MemoryStore::open(&storage.data_dir)
        .await
        .with_context(|| format!("Failed to open data directory {}", storage.data_dir.display()))?;
    let blobs = FsBlobStore::new(&storage.upload_dir, storage.public_url(&config.site));
    let guard = StaticTokenGuard::new(&config.admin);
    if config.admin.is_empty() {
        tracing::warn!("No admin tokens configured; admin API will reject every request");
    }

    let limiter = Arc::new(RateLimiter::from_config(&config.rate_limit));
    let sweeper = limiter.spawn_sweeper(Duration::from_secs(
        config.rate_limit.sweep_interval_secs.max(1),
    ));

    let state = AppState::new(
        Arc::new(store),
        Arc::new(blobs),
        Arc::new(guard),
        limiter,
        config.site.clone(),
    );

    let mut app = create_router(state);
    let upload_prefix = storage.public_base_url.trim_end_matches('/');
    if upload_prefix.starts_with('/') {
        app = app.nest_service(upload_prefix, ServeDir::new(&storage.upload_dir));
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(address = %addr, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    Ok(())
}

/// Wait for Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server");
}
