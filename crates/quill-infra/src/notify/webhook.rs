//! Webhook notifier - delivers lifecycle notices to an external log sink.

use std::time::Duration;

use async_trait::async_trait;

use quill_core::ports::{LifecycleNotice, Notifier, NotifyError};

/// Bound on a single delivery attempt so a slow or unreachable sink cannot
/// accumulate unbounded in-flight dispatch tasks.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Notifier that POSTs each notice as JSON to `<base>/logs`.
pub struct WebhookNotifier {
    endpoint: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            endpoint: format!("{}/logs", base_url.trim_end_matches('/')),
            client,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, notice: LifecycleNotice) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&notice)
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifyError::Delivery(format!(
                "sink responded with {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_tolerates_trailing_slashes() {
        let notifier = WebhookNotifier::new("http://sink.local:3002///");
        assert_eq!(notifier.endpoint, "http://sink.local:3002/logs");

        let notifier = WebhookNotifier::new("http://sink.local:3002");
        assert_eq!(notifier.endpoint, "http://sink.local:3002/logs");
    }
}
