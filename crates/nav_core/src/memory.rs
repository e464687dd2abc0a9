//! Snapshot-backed [`Directory`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{
    domain::{Channel, ChannelId, Guild, GuildId, GuildPlacement, Permissions, UserId},
    error::DirectoryError,
};

use crate::Directory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionOverride {
    pub channel_id: ChannelId,
    pub allow: Permissions,
}

/// Everything the directory knows about one user's view of the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorySnapshot {
    pub current_user_id: UserId,
    #[serde(default)]
    pub guilds: Vec<Guild>,
    #[serde(default)]
    pub placements: Vec<GuildPlacement>,
    /// Guild channels; each carries its `guild_id`.
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub private_channels: Vec<Channel>,
    #[serde(default = "default_permissions")]
    pub default_permissions: Permissions,
    #[serde(default)]
    pub permission_overrides: Vec<PermissionOverride>,
    /// Channels whose permission lookup fails.
    #[serde(default)]
    pub permission_failures: Vec<ChannelId>,
}

fn default_permissions() -> Permissions {
    Permissions::VIEW_CHANNEL
}

impl DirectorySnapshot {
    pub fn new(current_user_id: UserId) -> Self {
        Self {
            current_user_id,
            guilds: Vec::new(),
            placements: Vec::new(),
            channels: Vec::new(),
            private_channels: Vec::new(),
            default_permissions: default_permissions(),
            permission_overrides: Vec::new(),
            permission_failures: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MemoryDirectory {
    snapshot: DirectorySnapshot,
}

impl MemoryDirectory {
    pub fn new(current_user_id: UserId) -> Self {
        Self::from_snapshot(DirectorySnapshot::new(current_user_id))
    }

    pub fn from_snapshot(snapshot: DirectorySnapshot) -> Self {
        Self { snapshot }
    }

    pub fn placements(&self) -> &[GuildPlacement] {
        &self.snapshot.placements
    }

    pub fn with_guild(mut self, guild: Guild) -> Self {
        self.snapshot.guilds.push(guild);
        self
    }

    pub fn with_placement(mut self, placement: GuildPlacement) -> Self {
        self.snapshot.placements.push(placement);
        self
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.snapshot.channels.push(channel);
        self
    }

    pub fn with_private_channel(mut self, channel: Channel) -> Self {
        self.snapshot.private_channels.push(channel);
        self
    }

    pub fn with_default_permissions(mut self, permissions: Permissions) -> Self {
        self.snapshot.default_permissions = permissions;
        self
    }

    pub fn with_permissions(mut self, channel_id: ChannelId, allow: Permissions) -> Self {
        self.snapshot
            .permission_overrides
            .push(PermissionOverride { channel_id, allow });
        self
    }

    pub fn with_permission_failure(mut self, channel_id: ChannelId) -> Self {
        self.snapshot.permission_failures.push(channel_id);
        self
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn guild_by_id(&self, guild_id: GuildId) -> Result<Guild, DirectoryError> {
        self.snapshot
            .guilds
            .iter()
            .find(|guild| guild.id == guild_id)
            .cloned()
            .ok_or_else(|| DirectoryError::not_found(format!("guild {} not found", guild_id.0)))
    }

    async fn channels_of_guild(&self, guild_id: GuildId) -> Result<Vec<Channel>, DirectoryError> {
        self.guild_by_id(guild_id).await?;
        Ok(self
            .snapshot
            .channels
            .iter()
            .filter(|channel| channel.guild_id == Some(guild_id))
            .cloned()
            .collect())
    }

    async fn channel_by_id(&self, channel_id: ChannelId) -> Result<Channel, DirectoryError> {
        self.snapshot
            .channels
            .iter()
            .chain(&self.snapshot.private_channels)
            .find(|channel| channel.id == channel_id)
            .cloned()
            .ok_or_else(|| {
                DirectoryError::not_found(format!("channel {} not found", channel_id.0))
            })
    }

    async fn private_channels(&self) -> Result<Vec<Channel>, DirectoryError> {
        Ok(self.snapshot.private_channels.clone())
    }

    async fn permissions_of(
        &self,
        channel_id: ChannelId,
        user_id: UserId,
    ) -> Result<Permissions, DirectoryError> {
        if self.snapshot.permission_failures.contains(&channel_id) {
            return Err(DirectoryError::lookup_failure(format!(
                "permission lookup failed for channel {}",
                channel_id.0
            )));
        }
        if user_id != self.snapshot.current_user_id {
            return Err(DirectoryError::not_found(format!(
                "no permission data for user {}",
                user_id.0
            )));
        }
        Ok(self
            .snapshot
            .permission_overrides
            .iter()
            .find(|entry| entry.channel_id == channel_id)
            .map(|entry| entry.allow)
            .unwrap_or(self.snapshot.default_permissions))
    }

    async fn current_user_id(&self) -> Result<UserId, DirectoryError> {
        Ok(self.snapshot.current_user_id)
    }
}

#[cfg(test)]
#[path = "tests/memory_tests.rs"]
mod tests;
