use crate::validation::FieldErrors;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Errors produced by a submit cycle.
#[derive(Debug, Clone)]
pub enum FormError {
    /// One or more fields failed the schema. Raised before any network call.
    Validation(FieldErrors),
    /// The webhook rejected the payload or could not be reached.
    Submission(String),
    /// The request body could not be read as a form snapshot.
    BadRequest(String),
}

impl FormError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FormError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            FormError::Submission(_) => StatusCode::BAD_GATEWAY,
            FormError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Validation(errors) => {
                let fields: Vec<&str> = errors.keys().map(|field| field.as_str()).collect();
                write!(f, "Validation failed: {}", fields.join(", "))
            }
            FormError::Submission(msg) => write!(f, "Submission failed: {}", msg),
            FormError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
        }
    }
}

impl std::error::Error for FormError {}

impl IntoResponse for FormError {
    /// Maps validation failures to 422 with per-field messages, unreadable
    /// bodies to 400 and submission failures to 502 with a generic message.
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            FormError::Validation(errors) => {
                tracing::debug!("Rejected consultation request: {}", self);
                json!({
                    "error": "Validation failed",
                    "fields": errors,
                })
            }
            FormError::Submission(msg) => {
                tracing::error!("Webhook submission error: {}", msg);
                json!({
                    "error": "Submission failed, please try again",
                })
            }
            FormError::BadRequest(msg) => {
                tracing::debug!("Unreadable consultation body: {}", msg);
                json!({
                    "error": msg,
                    "fields": {},
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for FormError {
    fn from(rejection: JsonRejection) -> Self {
        FormError::BadRequest(rejection.body_text())
    }
}

impl From<reqwest::Error> for FormError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FormError::Submission(format!("Webhook request timed out: {}", err))
        } else {
            FormError::Submission(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FormField;

    #[test]
    fn test_display_lists_failing_fields() {
        let errors = FieldErrors::from([
            (FormField::Email, "Email is required".to_string()),
            (FormField::FullName, "Full name is required".to_string()),
        ]);
        let err = FormError::Validation(errors);
        assert_eq!(err.to_string(), "Validation failed: fullName, email");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            FormError::Validation(FieldErrors::new()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            FormError::Submission("boom".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            FormError::BadRequest("bad json".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
