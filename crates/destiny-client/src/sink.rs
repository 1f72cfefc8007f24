//! Delivery sinks.
//!
//! A [`Sink`] takes a payload and returns nothing: callers cannot tell a
//! delivered payload from a dropped one. Implementations log what happened
//! on the wire and keep it to themselves.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::error::ClientError;
use crate::payload::Payload;

/// Fragments that mark a URL as a template value someone forgot to fill in.
const PLACEHOLDER_MARKERS: &[&str] = &["请在此处", "your-webhook", "YOUR_", "<", "example.invalid"];

#[async_trait]
pub trait Sink: Send + Sync {
    /// Short name used in logs.
    fn label(&self) -> &str;

    /// Best-effort delivery. Never reports an outcome.
    async fn deliver(&self, payload: &Payload);
}

/// Whether a configured URL is usable at all.
pub fn is_configured(url: Option<&str>) -> bool {
    match url.map(str::trim) {
        None | Some("") => false,
        Some(url) => !PLACEHOLDER_MARKERS.iter().any(|m| url.contains(m)),
    }
}

/// POSTs the payload as JSON to a webhook.
pub struct WebhookSink {
    label: String,
    url: Option<String>,
    client: reqwest::Client,
}

impl WebhookSink {
    pub fn new(
        label: impl Into<String>,
        url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("destiny-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(label, url, client))
    }

    pub fn with_client(
        label: impl Into<String>,
        url: Option<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            label: label.into(),
            url,
            client,
        }
    }
}

#[async_trait]
impl Sink for WebhookSink {
    fn label(&self) -> &str {
        &self.label
    }

    async fn deliver(&self, payload: &Payload) {
        let url = match self.url.as_deref() {
            Some(url) if is_configured(Some(url)) => url,
            _ => {
                warn!(sink = %self.label, "webhook URL not configured, skipping delivery");
                return;
            }
        };

        match self.client.post(url).json(payload).send().await {
            Ok(resp) => {
                // Status is logged only; the body is never read.
                debug!(sink = %self.label, status = %resp.status(), "webhook responded");
                info!(sink = %self.label, "payload sent");
            }
            Err(e) => {
                error!(sink = %self.label, error = %e, "delivery failed");
            }
        }
    }
}
