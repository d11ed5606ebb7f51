//! Beacon dispatch: cooldown enforcement, body-size validation, and
//! delegation to the injected webhook port.

use std::sync::Arc;

use bytes_common::Clock;
use bytes_ledger::repository::GuildConfigRepository;

use super::entities::{BeaconAck, WebhookIdentity};
use super::errors::AnnounceError;
use super::webhook::WebhookPort;
use crate::repository::AnnounceRepositories;

const COOLDOWN_MINUTES: i64 = 720;

#[derive(Clone)]
pub struct AnnounceService {
    repos: AnnounceRepositories,
    configs: GuildConfigRepository,
    webhook: Arc<dyn WebhookPort>,
    clock: Arc<dyn Clock>,
}

impl AnnounceService {
    pub fn new(
        repos: AnnounceRepositories,
        configs: GuildConfigRepository,
        webhook: Arc<dyn WebhookPort>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repos,
            configs,
            webhook,
            clock,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn send_beacon(
        &self,
        guild_id: &str,
        user_id: &str,
        channel_id: &str,
        content: &str,
        identity_name: &str,
        identity_avatar_url: Option<&str>,
        role_id: Option<&str>,
    ) -> Result<BeaconAck, AnnounceError> {
        let now = self.clock.now();

        if let Some(last) = self
            .repos
            .cooldowns
            .last_beacon_at(guild_id, user_id)
            .await
            .map_err(AnnounceError::Repository)?
        {
            let cooldown_end = last + chrono::Duration::minutes(COOLDOWN_MINUTES);
            if now < cooldown_end {
                let seconds_remaining = (cooldown_end - now).num_seconds().max(0);
                return Err(AnnounceError::OnCooldown { seconds_remaining });
            }
        }

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(AnnounceError::EmptyBody);
        }

        let config = self
            .configs
            .get_or_create(guild_id, now)
            .await
            .map_err(AnnounceError::Repository)?;

        let role_mention = role_id
            .map(|id| format!("<@&{id}>"))
            .unwrap_or_default();
        let full_message = if role_mention.is_empty() {
            trimmed.to_string()
        } else {
            format!("{trimmed}\n\n{role_mention}")
        };

        if full_message.chars().count() as i32 > config.beacon_message_limit {
            return Err(AnnounceError::TooLong {
                limit: config.beacon_message_limit,
            });
        }

        let identity = WebhookIdentity {
            name: identity_name.to_string(),
            avatar_url: identity_avatar_url.map(str::to_string),
        };

        self.webhook
            .send(channel_id, &identity, &full_message)
            .await?;

        self.repos
            .cooldowns
            .set_last_beacon_at(guild_id, user_id, now)
            .await
            .map_err(AnnounceError::Repository)?;

        Ok(BeaconAck { delivered: true })
    }
}
