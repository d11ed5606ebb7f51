//! Announce domain: beacon dispatch via an outbound webhook port with
//! per-user cooldown and channel message-size enforcement.

pub mod api;
pub mod domain;
pub mod repository;

pub use domain::{
    AnnounceError, AnnounceService, BeaconAck, HttpWebhookPort, WebhookCache, WebhookError,
    WebhookIdentity, WebhookPort,
};
pub use api::AnnounceState;
pub use repository::AnnounceRepositories;
