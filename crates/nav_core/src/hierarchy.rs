//! Builds a guild's channel subtree from its flat channel list.
//!
//! The three passes run in a fixed order: orphans, then category shells,
//! then category children. The order determines on-screen placement. The
//! input must already be sorted by ascending position.

use std::collections::HashMap;

use shared::domain::{Channel, ChannelId, ChannelKind};
use tracing::debug;

use crate::{
    labels::channel_label,
    node::{Node, NodeIds, NodeRef},
};

/// Answers whether the viewer may see a channel.
pub trait ChannelGate {
    fn allows(&self, channel: &Channel) -> bool;
}

impl<F> ChannelGate for F
where
    F: Fn(&Channel) -> bool,
{
    fn allows(&self, channel: &Channel) -> bool {
        self(channel)
    }
}

pub fn resolve_guild_channels(
    channels: &[Channel],
    gate: &dyn ChannelGate,
    ids: &mut NodeIds,
) -> Vec<Node> {
    let mut children = Vec::new();

    for channel in channels
        .iter()
        .filter(|channel| channel.kind != ChannelKind::Category && channel.parent_id.is_none())
    {
        if gate.allows(channel) {
            children.push(channel_node(channel, ids));
        }
    }

    // Category id -> index into `children`.
    let mut categories: HashMap<ChannelId, usize> = HashMap::new();
    for category in channels
        .iter()
        .filter(|channel| channel.kind == ChannelKind::Category)
    {
        if categories.contains_key(&category.id) || !has_members(channels, category.id) {
            continue;
        }
        categories.insert(category.id, children.len());
        children.push(channel_node(category, ids).with_expanded(true));
    }

    for channel in channels {
        let Some(parent_id) = channel.parent_id else {
            continue;
        };
        if channel.kind == ChannelKind::Category {
            debug!(channel_id = channel.id.0, "ignoring parent of category channel");
            continue;
        }
        let Some(&index) = categories.get(&parent_id) else {
            debug!(
                channel_id = channel.id.0,
                parent_id = parent_id.0,
                "dropping channel without a materialized category"
            );
            continue;
        };
        if gate.allows(channel) {
            let node = channel_node(channel, ids);
            children[index].push_child(node);
        }
    }

    children
}

/// DM and group DM channels, flat and unfiltered, in the order given.
pub fn resolve_private_channels(channels: &[Channel], ids: &mut NodeIds) -> Vec<Node> {
    channels
        .iter()
        .map(|channel| channel_node(channel, ids))
        .collect()
}

fn has_members(channels: &[Channel], category_id: ChannelId) -> bool {
    channels
        .iter()
        .any(|channel| channel.id != category_id && channel.parent_id == Some(category_id))
}

fn channel_node(channel: &Channel, ids: &mut NodeIds) -> Node {
    Node::new(
        ids.next(),
        NodeRef::Channel(channel.id),
        channel_label(channel),
    )
}

#[cfg(test)]
#[path = "tests/hierarchy_tests.rs"]
mod tests;
