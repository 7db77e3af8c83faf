//! Notification sink clients.

mod webhook;

pub use webhook::WebhookNotifier;

use async_trait::async_trait;

use quill_core::ports::{LifecycleNotice, Notifier, NotifyError};

/// Notifier used when no sink is configured - every notice is silently
/// dropped, which is a no-op rather than an error.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, _notice: LifecycleNotice) -> Result<(), NotifyError> {
        Ok(())
    }
}
