use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use consultation_form::config::Config;
use consultation_form::handlers::AppState;
use consultation_form::webhook_client::WebhookClient;

/// Main entry point for the application.
///
/// Initializes tracing, loads configuration, builds the webhook client and
/// serves the consultation form.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "consultation_form=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let webhook_client =
        WebhookClient::new(config.webhook_url.clone(), config.webhook_timeout())?;
    tracing::info!(
        "✓ Webhook client initialized (timeout {}s)",
        config.webhook_timeout_secs
    );

    let app_state = Arc::new(AppState { webhook_client });

    let app = consultation_form::build_app(app_state)?;
    app.spawn_limiter_cleanup(Duration::from_secs(60));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
