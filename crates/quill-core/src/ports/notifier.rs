//! Notifier port - best-effort sink for lifecycle events.

use async_trait::async_trait;
use serde::Serialize;

/// Severity attached to a lifecycle notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NoticeLevel {
    Success,
    Info,
    Warn,
}

/// Tag identifying which lifecycle transition occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LifecycleEvent {
    #[serde(rename = "post.created")]
    Created,
    #[serde(rename = "post.updated")]
    Updated,
    #[serde(rename = "post.deleted")]
    Deleted,
}

/// Structured metadata carried with every notice.
#[derive(Debug, Clone, Serialize)]
pub struct NoticeMetadata {
    pub event: LifecycleEvent,
    /// External (string) form of the affected post's id.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<serde_json::Value>,
}

/// Event payload delivered to the external observer.
#[derive(Debug, Clone, Serialize)]
pub struct LifecycleNotice {
    pub level: NoticeLevel,
    pub message: String,
    pub metadata: NoticeMetadata,
}

impl LifecycleNotice {
    pub fn created(id: String, title: String) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: "Post created successfully".to_owned(),
            metadata: NoticeMetadata {
                event: LifecycleEvent::Created,
                id,
                title: Some(title),
                changes: None,
            },
        }
    }

    pub fn updated(id: String, changes: serde_json::Value) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: "Post updated successfully".to_owned(),
            metadata: NoticeMetadata {
                event: LifecycleEvent::Updated,
                id,
                title: None,
                changes: Some(changes),
            },
        }
    }

    pub fn deleted(id: String) -> Self {
        Self {
            level: NoticeLevel::Warn,
            message: "Post deleted".to_owned(),
            metadata: NoticeMetadata {
                event: LifecycleEvent::Deleted,
                id,
                title: None,
                changes: None,
            },
        }
    }
}

/// Notifier - the sink receiving lifecycle notices.
///
/// Delivery is best-effort by contract: implementations bound their own
/// timeouts, and callers treat any failure as droppable.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notice: LifecycleNotice) -> Result<(), NotifyError>;
}

/// Notice delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Failed to deliver notice: {0}")]
    Delivery(String),
}
