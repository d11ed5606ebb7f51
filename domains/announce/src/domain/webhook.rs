//! Outbound webhook port: the core delegates delivery to this trait and
//! never opens a gateway socket directly (spec: Announce component §4.5).

use dashmap::DashMap;

use super::entities::WebhookIdentity;

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("webhook not found")]
    NotFound,

    #[error("webhook send timed out")]
    Timeout,

    #[error("webhook send failed: {0}")]
    Unreachable(String),
}

/// `Webhook.Send(channel_id, identity, content)`. Implementations are
/// expected to own their own handle cache; `WebhookCache` below is a
/// thin `channel_id -> handle` map implementations can compose with.
#[async_trait::async_trait]
pub trait WebhookPort: Send + Sync {
    async fn send(
        &self,
        channel_id: &str,
        identity: &WebhookIdentity,
        content: &str,
    ) -> Result<(), WebhookError>;
}

/// `channel_id -> opaque webhook handle` cache. The core treats the handle
/// as opaque; a 404/invalid-webhook signal from the port invalidates the
/// entry for that channel.
#[derive(Debug, Default)]
pub struct WebhookCache<H> {
    handles: DashMap<String, H>,
}

impl<H: Clone> WebhookCache<H> {
    pub fn new() -> Self {
        Self {
            handles: DashMap::new(),
        }
    }

    pub fn get(&self, channel_id: &str) -> Option<H> {
        self.handles.get(channel_id).map(|h| h.clone())
    }

    pub fn insert(&self, channel_id: impl Into<String>, handle: H) {
        self.handles.insert(channel_id.into(), handle);
    }

    pub fn invalidate(&self, channel_id: &str) {
        self.handles.remove(channel_id);
    }
}
