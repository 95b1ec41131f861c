//! Remote intent service client with local fallback.
//!
//! When `NEXUS_INTENT_UPSTREAM_URL` is set, intent processing is first
//! offered to `{url}/process-intent`. Any transport error, non-success
//! status, or unparseable body falls back to the local processor, so the
//! endpoint keeps answering while the remote service is down.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use nexus_core::{CollaboratorError, IntentProcessor};

pub struct UpstreamIntentProcessor {
    client: reqwest::Client,
    endpoint: String,
    fallback: Arc<dyn IntentProcessor>,
}

impl UpstreamIntentProcessor {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        fallback: Arc<dyn IntentProcessor>,
    ) -> Result<Self, CollaboratorError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| {
                CollaboratorError::internal(format!("http client setup failed: {}", err))
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/process-intent", base_url.trim_end_matches('/')),
            fallback,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn ask_upstream(&self, text: &str) -> Result<Value, String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(|err| format!("request failed: {}", err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("upstream returned {}", status));
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| format!("response parse failed: {}", err))
    }
}

#[async_trait]
impl IntentProcessor for UpstreamIntentProcessor {
    async fn process(&self, text: &str) -> Result<Value, CollaboratorError> {
        match self.ask_upstream(text).await {
            Ok(value) => Ok(value),
            Err(reason) => {
                tracing::warn!(
                    endpoint = %self.endpoint,
                    %reason,
                    "intent upstream unavailable, using fallback"
                );
                self.fallback.process(text).await
            }
        }
    }
}
