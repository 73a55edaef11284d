use crate::errors::FormError;
use crate::models::ConsultationPayload;
use std::time::Duration;

/// Default bound on a single webhook call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the consultation webhook.
///
/// Posts the JSON payload once per call. There is no retry; the caller
/// decides whether to resubmit.
#[derive(Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    url: String,
}

impl WebhookClient {
    /// Creates a new `WebhookClient`.
    ///
    /// # Arguments
    ///
    /// * `url` - The webhook endpoint that receives consultation requests.
    /// * `timeout` - Upper bound for connecting and receiving the response.
    pub fn new(url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create webhook client: {}", e))?;

        Ok(Self { client, url })
    }

    /// Posts a consultation payload to the webhook.
    ///
    /// Any 2xx status counts as delivered. The response body is ignored.
    ///
    /// # Returns
    ///
    /// * `Result<(), FormError>` - `FormError::Submission` on a non-2xx
    ///   status or a transport failure.
    pub async fn send(&self, payload: &ConsultationPayload) -> Result<(), FormError> {
        tracing::info!(
            "Posting consultation request to webhook ({} / {})",
            payload.insurance_type.as_str(),
            payload.contact_time.as_str()
        );

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Webhook request failed: {}", e);
                FormError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Webhook returned {}", status);
            return Err(FormError::Submission(format!("Webhook returned {}", status)));
        }

        tracing::info!("✓ Webhook accepted consultation request ({})", status);
        Ok(())
    }
}
