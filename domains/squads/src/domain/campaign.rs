//! The "is a challenge campaign active?" signal that gates squad switching.
//!
//! Kept as an injected port (mirroring [`bytes_common::Clock`]) rather than a
//! hardcoded config lookup, since the source of this signal is explicitly
//! left open — some guilds may drive it from a `GuildConfig` flag, others
//! from an external campaign scheduler.

use bytes_ledger::repository::GuildConfigRepository;

#[async_trait::async_trait]
pub trait CampaignGate: Send + Sync {
    async fn is_active(&self, guild_id: &str) -> bool;
}

/// A campaign gate that is always off — used where no campaign source is
/// configured.
pub struct NoCampaign;

#[async_trait::async_trait]
impl CampaignGate for NoCampaign {
    async fn is_active(&self, _guild_id: &str) -> bool {
        false
    }
}

/// Drives the campaign signal from the `campaign_active` column on
/// `guild_configs`, flipped through the ledger admin config endpoint.
pub struct ConfigCampaignGate {
    configs: GuildConfigRepository,
}

impl ConfigCampaignGate {
    pub fn new(configs: GuildConfigRepository) -> Self {
        Self { configs }
    }
}

#[async_trait::async_trait]
impl CampaignGate for ConfigCampaignGate {
    async fn is_active(&self, guild_id: &str) -> bool {
        self.configs
            .campaign_active(guild_id)
            .await
            .unwrap_or(false)
    }
}

#[cfg(test)]
pub struct FixedCampaign(pub bool);

#[cfg(test)]
#[async_trait::async_trait]
impl CampaignGate for FixedCampaign {
    async fn is_active(&self, _guild_id: &str) -> bool {
        self.0
    }
}
