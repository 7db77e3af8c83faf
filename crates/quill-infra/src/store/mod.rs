//! Document store adapters for post records.

mod memory;

#[cfg(feature = "mongodb")]
mod document;
#[cfg(feature = "mongodb")]
mod mongo;

pub use memory::InMemoryPostStore;

#[cfg(feature = "mongodb")]
pub use mongo::MongoPostStore;

/// Configuration for the backing document store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Connection string understood by the driver.
    pub uri: String,
    /// Database holding the posts collection.
    pub database: String,
}
