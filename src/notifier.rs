use std::sync::{Arc, Mutex};

/// Visual treatment of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationVariant {
    Default,
    /// Error styling.
    Destructive,
}

/// A user-facing toast/banner message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn submitted() -> Self {
        Self {
            title: "Request Submitted!".to_string(),
            description: "Thank you! An agent will contact you within 24 hours to discuss your insurance options.".to_string(),
            variant: NotificationVariant::Default,
        }
    }

    pub fn failed() -> Self {
        Self {
            title: "Submission Failed".to_string(),
            description: "Something went wrong. Please try again or call us directly."
                .to_string(),
            variant: NotificationVariant::Destructive,
        }
    }

    pub fn is_error(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}

/// Capability for telling the visitor how a submission went.
pub trait Notifier: Send + Sync {
    fn notify_success(&self, notification: &Notification);
    fn notify_failure(&self, notification: &Notification);
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_success(&self, notification: &Notification) {
        tracing::info!("✓ {}: {}", notification.title, notification.description);
    }

    fn notify_failure(&self, notification: &Notification) {
        tracing::warn!("{}: {}", notification.title, notification.description);
    }
}

/// Keeps every notification it receives so it can be rendered later.
///
/// Cloning shares the underlying buffer.
#[derive(Debug, Clone, Default)]
pub struct CollectingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<Notification> {
        self.sent.lock().ok().and_then(|sent| sent.last().cloned())
    }

    pub fn all(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }

    fn push(&self, notification: &Notification) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(notification.clone());
        }
    }
}

impl Notifier for CollectingNotifier {
    fn notify_success(&self, notification: &Notification) {
        self.push(notification);
    }

    fn notify_failure(&self, notification: &Notification) {
        self.push(notification);
    }
}
