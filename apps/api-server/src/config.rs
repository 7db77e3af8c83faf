//! Application configuration loaded from environment variables.

use std::env;

use quill_infra::store::StoreConfig;

/// Database name used when `MONGODB_DB` is unset.
const DEFAULT_DATABASE: &str = "quill";

/// Application configuration.
///
/// Environment variables and their defaults:
/// - `HOST` - bind address, default `127.0.0.1`
/// - `PORT` - bind port, default `3001`
/// - `MONGODB_URI` (or `MONGO_URI`) - store connection string; unset runs
///   the server on the in-memory store
/// - `MONGODB_DB` (or `MONGO_DB`) - database name, default `quill`
/// - `NOTIFIER_URL` - base URL of the log sink; unset disables dispatch
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: Option<StoreConfig>,
    pub notifier_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let store = env::var("MONGODB_URI")
            .or_else(|_| env::var("MONGO_URI"))
            .ok()
            .map(|uri| StoreConfig {
                uri,
                database: env::var("MONGODB_DB")
                    .or_else(|_| env::var("MONGO_DB"))
                    .unwrap_or_else(|_| DEFAULT_DATABASE.to_string()),
            });

        let notifier_url = env::var("NOTIFIER_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            store,
            notifier_url,
        }
    }
}
