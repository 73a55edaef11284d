use crate::controller::FormController;
use crate::errors::FormError;
use crate::models::FormState;
use crate::notifier::{CollectingNotifier, Notification, Notifier, TracingNotifier};
use crate::render::render_form_page;
use crate::validation::FieldErrors;
use crate::webhook_client::WebhookClient;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Html,
    Form, Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Client for the consultation webhook.
    pub webhook_client: WebhookClient,
}

/// Fans notifications out to the log and to a buffer the page renders from.
struct PageNotifier {
    page: CollectingNotifier,
    log: TracingNotifier,
}

impl Notifier for PageNotifier {
    fn notify_success(&self, notification: &Notification) {
        self.log.notify_success(notification);
        self.page.notify_success(notification);
    }

    fn notify_failure(&self, notification: &Notification) {
        self.log.notify_failure(notification);
        self.page.notify_failure(notification);
    }
}

/// Health check endpoint.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "consultation-form",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /
///
/// Renders an empty consultation form.
pub async fn show_form() -> Html<String> {
    Html(render_form_page(&FormState::default(), &FieldErrors::new(), None))
}

/// POST /
///
/// Runs one submit cycle for a posted HTML form and re-renders the page.
/// Values are kept on any failure and cleared after a successful send.
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<FormState>,
) -> (StatusCode, Html<String>) {
    let page = CollectingNotifier::new();
    let notifier = Arc::new(PageNotifier {
        page: page.clone(),
        log: TracingNotifier,
    });
    let mut controller =
        FormController::with_state(form, state.webhook_client.clone(), notifier);

    let status = match controller.submit().await {
        Ok(()) => StatusCode::OK,
        Err(e) => e.status_code(),
    };

    let html = render_form_page(controller.state(), controller.errors(), page.last().as_ref());
    (status, Html(html))
}

/// POST /api/v1/consultations
///
/// JSON variant of the form submission for scripted clients.
///
/// # Returns
///
/// * `Result<Json<serde_json::Value>, FormError>` - `{"status":"submitted"}`,
///   400 for an unreadable body, 422 with per-field messages, or 502 when
///   the webhook fails.
pub async fn submit_consultation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FormState>, JsonRejection>,
) -> Result<Json<serde_json::Value>, FormError> {
    tracing::info!("POST /api/v1/consultations");

    let Json(form) = payload?;

    let mut controller = FormController::with_state(
        form,
        state.webhook_client.clone(),
        Arc::new(TracingNotifier),
    );
    controller.submit().await?;

    Ok(Json(json!({ "status": "submitted" })))
}
