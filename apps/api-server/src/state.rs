//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::PostService;
use quill_core::ports::{Notifier, PostStore};
use quill_infra::notify::{NoopNotifier, WebhookNotifier};
use quill_infra::store::InMemoryPostStore;

#[cfg(feature = "mongodb")]
use quill_infra::store::MongoPostStore;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub store: Arc<dyn PostStore>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "mongodb")]
        let store: Arc<dyn PostStore> = match &config.store {
            Some(store_config) => match MongoPostStore::connect(store_config).await {
                Ok(store) => Arc::new(store),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to document store: {}. Using in-memory fallback.",
                        e
                    );
                    Arc::new(InMemoryPostStore::new())
                }
            },
            None => {
                tracing::warn!(
                    "MONGODB_URI not set. Running without a document store (in-memory mode)."
                );
                Arc::new(InMemoryPostStore::new())
            }
        };

        #[cfg(not(feature = "mongodb"))]
        let store: Arc<dyn PostStore> = {
            tracing::info!("Running without mongodb feature - using in-memory store");
            Arc::new(InMemoryPostStore::new())
        };

        let notifier: Arc<dyn Notifier> = match &config.notifier_url {
            Some(url) => Arc::new(WebhookNotifier::new(url)),
            None => {
                tracing::info!("NOTIFIER_URL not set - lifecycle notices disabled");
                Arc::new(NoopNotifier)
            }
        };

        tracing::info!("Application state initialized");

        Self::with_parts(store, notifier)
    }

    /// Wire the state from already-built collaborators.
    pub fn with_parts(store: Arc<dyn PostStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            posts: Arc::new(PostService::new(Arc::clone(&store), notifier)),
            store,
        }
    }
}
