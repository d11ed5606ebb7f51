//! `reqwest`-backed `WebhookPort`: executes a Discord-style incoming webhook
//! URL (`https://discord.com/api/webhooks/{id}/{token}`) registered per
//! channel by the gateway at configuration time.

use std::time::Duration;

use serde::Serialize;

use super::entities::WebhookIdentity;
use super::webhook::{WebhookCache, WebhookError, WebhookPort};

#[derive(Serialize)]
struct WebhookExecutePayload<'a> {
    content: &'a str,
    username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar_url: Option<&'a str>,
    allowed_mentions: AllowedMentions,
}

#[derive(Serialize)]
struct AllowedMentions {
    parse: Vec<&'static str>,
}

/// Real webhook dispatcher. Channel-to-URL mappings are supplied by the
/// gateway via [`register_webhook`](Self::register_webhook); this crate
/// never discovers or creates webhooks itself.
pub struct HttpWebhookPort {
    client: reqwest::Client,
    urls: WebhookCache<String>,
}

impl HttpWebhookPort {
    /// `timeout` is the per-send deadline (spec: 3 seconds by default,
    /// configurable via `WEBHOOK_TIMEOUT_MS`).
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client builds with static config");
        Self {
            client,
            urls: WebhookCache::new(),
        }
    }

    pub fn register_webhook(&self, channel_id: impl Into<String>, webhook_url: impl Into<String>) {
        self.urls.insert(channel_id, webhook_url.into());
    }
}

#[async_trait::async_trait]
impl WebhookPort for HttpWebhookPort {
    async fn send(
        &self,
        channel_id: &str,
        identity: &WebhookIdentity,
        content: &str,
    ) -> Result<(), WebhookError> {
        let url = self
            .urls
            .get(channel_id)
            .ok_or(WebhookError::NotFound)?;

        let payload = WebhookExecutePayload {
            content,
            username: &identity.name,
            avatar_url: identity.avatar_url.as_deref(),
            // Role mentions must actually ping for a beacon to be useful.
            allowed_mentions: AllowedMentions {
                parse: vec!["roles"],
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WebhookError::Timeout
                } else {
                    WebhookError::Unreachable(e.to_string())
                }
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            self.urls.invalidate(channel_id);
            return Err(WebhookError::NotFound);
        }

        if !response.status().is_success() {
            return Err(WebhookError::Unreachable(format!(
                "webhook responded with status {}",
                response.status()
            )));
        }

        Ok(())
    }
}
