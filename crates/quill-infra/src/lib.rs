//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the document store adapters and the notification
//! sink client.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `mongodb` - MongoDB document store support

pub mod notify;
pub mod store;

// Re-exports - In-Memory
pub use store::InMemoryPostStore;

pub use notify::{NoopNotifier, WebhookNotifier};

#[cfg(feature = "mongodb")]
pub use store::MongoPostStore;
