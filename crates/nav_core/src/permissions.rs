//! Per-channel visibility for the viewing user.

use std::collections::HashSet;

use futures::future::join_all;
use shared::domain::{Channel, ChannelId, ChannelKind, Permissions, UserId};
use tracing::error;

use crate::{hierarchy::ChannelGate, Directory};

pub struct PermissionFilter<'a> {
    directory: &'a dyn Directory,
    viewer: UserId,
}

impl<'a> PermissionFilter<'a> {
    pub fn new(directory: &'a dyn Directory, viewer: UserId) -> Self {
        Self { directory, viewer }
    }

    /// Private channels are always visible. Guild channels need `VIEW_CHANNEL`;
    /// a failed lookup hides the channel.
    pub async fn is_visible(&self, channel: &Channel) -> bool {
        if channel.kind.is_private() {
            return true;
        }

        match self.directory.permissions_of(channel.id, self.viewer).await {
            Ok(permissions) => permissions.has(Permissions::VIEW_CHANNEL),
            Err(err) => {
                error!(
                    channel_id = channel.id.0,
                    user_id = self.viewer.0,
                    err = %err,
                    "failed to get permissions"
                );
                false
            }
        }
    }
}

/// Channels the viewer was found able to see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    visible: HashSet<ChannelId>,
}

impl Visibility {
    pub fn from_ids(ids: impl IntoIterator<Item = ChannelId>) -> Self {
        Self {
            visible: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, channel_id: ChannelId) -> bool {
        self.visible.contains(&channel_id)
    }
}

impl ChannelGate for Visibility {
    fn allows(&self, channel: &Channel) -> bool {
        channel.kind.is_private() || self.contains(channel.id)
    }
}

/// Runs the filter over every non-category channel concurrently.
pub async fn visibility_for(
    directory: &dyn Directory,
    viewer: UserId,
    channels: &[Channel],
) -> Visibility {
    let filter = PermissionFilter::new(directory, viewer);
    let candidates: Vec<&Channel> = channels
        .iter()
        .filter(|channel| channel.kind != ChannelKind::Category)
        .collect();
    let verdicts = join_all(candidates.iter().map(|channel| filter.is_visible(channel))).await;

    Visibility::from_ids(
        candidates
            .iter()
            .zip(verdicts)
            .filter(|(_, visible)| *visible)
            .map(|(channel, _)| channel.id),
    )
}

#[cfg(test)]
#[path = "tests/permissions_tests.rs"]
mod tests;
