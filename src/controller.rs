//! Submission form controller.
//!
//! Owns the editable [`FormState`], validates it on submit, posts the
//! payload to the webhook and reports the outcome through a [`Notifier`].
//!
//! ```text
//! idle -> validating -> invalid: idle
//!                    -> valid: submitting -> ok: idle (state reset)
//!                                         -> error: idle (state kept)
//! ```

use crate::errors::FormError;
use crate::models::{ConsultationPayload, FormField, FormState};
use crate::notifier::{Notification, Notifier};
use crate::validation::{self, FieldErrors};
use crate::webhook_client::WebhookClient;
use std::sync::Arc;

/// Where the controller is in a submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Validating,
    Submitting,
}

pub struct FormController {
    state: FormState,
    errors: FieldErrors,
    phase: FormPhase,
    client: WebhookClient,
    notifier: Arc<dyn Notifier>,
}

impl FormController {
    pub fn new(client: WebhookClient, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_state(FormState::default(), client, notifier)
    }

    /// Starts from a prefilled snapshot, e.g. a posted HTML form.
    pub fn with_state(
        state: FormState,
        client: WebhookClient,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            state,
            errors: FieldErrors::new(),
            phase: FormPhase::Idle,
            client,
            notifier,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Messages from the last validation, keyed by field.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// True while the webhook call is outstanding; the submit action should
    /// be disabled.
    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Replaces one field's value. No validation happens here.
    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.state.set(field, value);
    }

    /// Validates a single field, e.g. on blur, and records the result.
    pub fn validate_field(&mut self, field: FormField) -> Option<String> {
        match validation::validate_field(&self.state, field) {
            Some(message) => {
                self.errors.insert(field, message.clone());
                Some(message)
            }
            None => {
                self.errors.remove(&field);
                None
            }
        }
    }

    /// Runs one submit cycle.
    ///
    /// Validation failures return `FormError::Validation` without touching
    /// the network. A valid form is posted exactly once; on success the
    /// state is reset, on failure it is kept for a manual retry.
    pub async fn submit(&mut self) -> Result<(), FormError> {
        self.phase = FormPhase::Validating;

        let request = match validation::validate(&self.state) {
            Ok(request) => request,
            Err(errors) => {
                tracing::debug!(
                    "Consultation form has {} invalid field(s): {:?}",
                    errors.len(),
                    errors.keys().collect::<Vec<_>>()
                );
                self.errors = errors.clone();
                self.phase = FormPhase::Idle;
                return Err(FormError::Validation(errors));
            }
        };
        self.errors.clear();

        let payload = ConsultationPayload::from_request(request);

        self.phase = FormPhase::Submitting;
        let result = self.client.send(&payload).await;
        self.phase = FormPhase::Idle;

        match result {
            Ok(()) => {
                self.notifier.notify_success(&Notification::submitted());
                self.reset();
                Ok(())
            }
            Err(e) => {
                tracing::error!("Consultation submission failed: {}", e);
                self.notifier.notify_failure(&Notification::failed());
                Err(e)
            }
        }
    }

    /// Clears every field and error back to the initial empty state.
    pub fn reset(&mut self) {
        self.state = FormState::default();
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::CollectingNotifier;
    use crate::webhook_client::DEFAULT_TIMEOUT;

    fn controller(notifier: CollectingNotifier) -> FormController {
        // Port 9 (discard) keeps any accidental request local.
        let client = WebhookClient::new("http://127.0.0.1:9/hook".to_string(), DEFAULT_TIMEOUT)
            .unwrap();
        FormController::new(client, Arc::new(notifier))
    }

    #[tokio::test]
    async fn test_empty_submit_fails_validation_without_notifying() {
        let notifier = CollectingNotifier::new();
        let mut form = controller(notifier.clone());

        let err = form.submit().await.unwrap_err();

        assert!(matches!(err, FormError::Validation(_)));
        assert_eq!(form.errors().len(), 6);
        assert_eq!(form.phase(), FormPhase::Idle);
        assert!(notifier.all().is_empty());
    }

    #[test]
    fn test_update_field_does_not_validate() {
        let mut form = controller(CollectingNotifier::new());
        form.update_field(FormField::Email, "not-an-email");

        assert_eq!(form.state().email, "not-an-email");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_validate_field_records_and_clears_error() {
        let mut form = controller(CollectingNotifier::new());
        form.update_field(FormField::ZipCode, "ABCDE");
        assert_eq!(
            form.validate_field(FormField::ZipCode).as_deref(),
            Some("Please enter a valid ZIP code")
        );
        assert!(form.errors().contains_key(&FormField::ZipCode));

        form.update_field(FormField::ZipCode, "85281-1234");
        assert_eq!(form.validate_field(FormField::ZipCode), None);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_reset_clears_state() {
        let mut form = controller(CollectingNotifier::new());
        form.update_field(FormField::FullName, "Jane Doe");
        form.reset();
        assert!(form.state().is_empty());
        assert!(!form.is_submitting());
    }
}
