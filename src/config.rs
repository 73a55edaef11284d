use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub webhook_url: String,
    pub webhook_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            webhook_url: std::env::var("WEBHOOK_URL")
                .map_err(|_| anyhow::anyhow!("WEBHOOK_URL environment variable required"))
                .and_then(|url| validate_webhook_url(&url).map(|_| url))?,
            webhook_timeout_secs: std::env::var("WEBHOOK_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .ok()
                .filter(|secs: &u64| *secs > 0)
                .ok_or_else(|| {
                    anyhow::anyhow!("WEBHOOK_TIMEOUT_SECS must be a positive number of seconds")
                })?,
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Webhook host: {}", webhook_host(&config.webhook_url));
        tracing::debug!("Webhook timeout: {}s", config.webhook_timeout_secs);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    pub fn webhook_timeout(&self) -> Duration {
        Duration::from_secs(self.webhook_timeout_secs)
    }
}

/// Checks that the webhook URL is a non-empty absolute http(s) URL.
pub fn validate_webhook_url(raw: &str) -> anyhow::Result<()> {
    if raw.trim().is_empty() {
        anyhow::bail!("WEBHOOK_URL cannot be empty");
    }
    let parsed = url::Url::parse(raw)
        .map_err(|e| anyhow::anyhow!("WEBHOOK_URL is not a valid URL: {}", e))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        anyhow::bail!("WEBHOOK_URL must start with http:// or https://");
    }
    Ok(())
}

// Webhook URLs often embed a secret path, so only the host is logged.
fn webhook_host(raw: &str) -> String {
    url::Url::parse(raw)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "<invalid>".to_string())
}
