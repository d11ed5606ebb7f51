//! Announce domain entities.

use serde::Serialize;

/// Opaque display identity a beacon message is sent under.
#[derive(Debug, Clone)]
pub struct WebhookIdentity {
    pub name: String,
    pub avatar_url: Option<String>,
}

/// Successful beacon dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct BeaconAck {
    pub delivered: bool,
}
