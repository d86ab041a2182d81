use async_trait::async_trait;
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use std::collections::HashMap;
use thiserror::Error;

/// A request to deliver a local notification at a wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub identifier: String,
    pub title: String,
    pub body: String,
    pub trigger_at: NaiveDateTime,
    pub repeats: bool,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Scheduling failed: {0}")]
    ScheduleFailed(String),
}

/// Port for the platform notification collaborator.
///
/// Scheduling the same identifier again replaces the pending request
/// (the later call wins). Cancelling an identifier with no pending
/// request is a no-op, never an error.
#[async_trait]
pub trait NotificationScheduler: Send + Sync {
    async fn schedule(&self, request: NotificationRequest) -> Result<(), NotifyError>;
    async fn cancel(&self, identifier: &str);
    async fn cancel_all(&self);
}

/// In-memory pending-request registry.
///
/// Stands in for the platform's notification center: it holds what would
/// be pending for delivery and honors the replace-on-reschedule and
/// cancel-absent-is-fine contracts. Screens and tests inspect it through
/// `pending()`.
#[derive(Debug, Default)]
pub struct PendingNotifications {
    pending: Mutex<HashMap<String, NotificationRequest>>,
}

impl PendingNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of pending requests, ordered by trigger time.
    pub fn pending(&self) -> Vec<NotificationRequest> {
        let mut requests: Vec<_> = self.pending.lock().values().cloned().collect();
        requests.sort_by_key(|r| r.trigger_at);
        requests
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_pending(&self, identifier: &str) -> bool {
        self.pending.lock().contains_key(identifier)
    }
}

#[async_trait]
impl NotificationScheduler for PendingNotifications {
    async fn schedule(&self, request: NotificationRequest) -> Result<(), NotifyError> {
        tracing::info!(
            "Scheduling notification {} at {}",
            request.identifier,
            request.trigger_at
        );
        self.pending
            .lock()
            .insert(request.identifier.clone(), request);
        Ok(())
    }

    async fn cancel(&self, identifier: &str) {
        if self.pending.lock().remove(identifier).is_some() {
            tracing::info!("Cancelled notification {}", identifier);
        } else {
            tracing::debug!("No pending notification {} to cancel", identifier);
        }
    }

    async fn cancel_all(&self) {
        let mut pending = self.pending.lock();
        tracing::info!("Cancelling all {} pending notifications", pending.len());
        pending.clear();
    }
}
