//! Consultation Form Library
//!
//! Collects a visitor's contact details and insurance preferences,
//! validates them against a fixed schema and forwards valid requests to an
//! external webhook.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `controller`: Submission form controller (field state, submit cycle).
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Form, request and payload types.
//! - `notifier`: User-facing success/failure notifications.
//! - `render`: Server-rendered HTML form.
//! - `validation`: Field validation schema.
//! - `webhook_client`: Webhook HTTP client.

pub mod config;
pub mod controller;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod notifier;
pub mod render;
pub mod validation;
pub mod webhook_client;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::handlers::AppState;

/// Largest accepted form or JSON body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

fn form_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::show_form).post(handlers::submit_form))
        .route("/api/v1/consultations", post(handlers::submit_consultation))
}

fn with_shared_layers(form_routes: Router<Arc<AppState>>, state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(form_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Builds the router without rate limiting.
///
/// Used directly by tests; [`build_app`] layers the governor on top.
pub fn build_router(state: Arc<AppState>) -> Router {
    let routes = form_routes().layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES));
    with_shared_layers(routes, state)
}

/// Production app plus the hook that prunes idle rate-limiter entries.
pub struct App {
    pub router: Router,
    retain_recent: Arc<dyn Fn() + Send + Sync>,
}

impl App {
    /// Spawns the background task that forgets clients idle for longer
    /// than the quota period. Call once per process.
    pub fn spawn_limiter_cleanup(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let retain_recent = self.retain_recent.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                retain_recent();
            }
        })
    }
}

/// Builds the production app: 10 req/sec per IP (one token every 100 ms)
/// with a burst of 20 on the form routes, health check exempt.
///
/// The governor keys on the client IP, so the app must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn build_app(state: Arc<AppState>) -> anyhow::Result<App> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(100)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?,
    );

    let governor_limiter = governor_conf.limiter().clone();
    let retain_recent: Arc<dyn Fn() + Send + Sync> =
        Arc::new(move || governor_limiter.retain_recent());

    let routes = form_routes().layer(
        ServiceBuilder::new()
            // Request size limit (form bodies are tiny)
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            // Rate limiting: 10 req/sec per IP, burst of 20
            .layer(GovernorLayer {
                config: governor_conf,
            }),
    );

    Ok(App {
        router: with_shared_layers(routes, state),
        retain_recent,
    })
}
