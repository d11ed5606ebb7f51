pub mod entities;
pub mod errors;
pub mod http_webhook;
pub mod service;
pub mod webhook;

pub use entities::{BeaconAck, WebhookIdentity};
pub use errors::AnnounceError;
pub use http_webhook::HttpWebhookPort;
pub use service::AnnounceService;
pub use webhook::{WebhookCache, WebhookError, WebhookPort};
