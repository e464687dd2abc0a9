//! Top-level tree: the direct-messages root, folders and guilds.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use shared::domain::{Folder, GuildId, GuildPlacement};
use tracing::{debug, info};

use crate::{
    labels::{folder_label, DIRECT_MESSAGES_LABEL},
    node::{Node, NodeId, NodeIds, NodeRef},
    Directory,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeOptions {
    pub auto_expand_folders: bool,
    pub show_direct_messages: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            auto_expand_folders: true,
            show_direct_messages: true,
        }
    }
}

/// A freshly built tree together with the id allocator that produced it.
#[derive(Debug)]
pub struct GuildTree {
    pub root: Node,
    pub direct_messages: Option<NodeId>,
    pub ids: NodeIds,
}

pub async fn build_guild_tree(
    directory: &dyn Directory,
    placements: &[GuildPlacement],
    options: TreeOptions,
) -> GuildTree {
    let mut ids = NodeIds::default();
    let mut root = Node::root(ids.next());

    let direct_messages = options.show_direct_messages.then(|| {
        root.push_child(Node::new(ids.next(), NodeRef::None, DIRECT_MESSAGES_LABEL))
            .id()
    });

    let mut placed = HashSet::new();
    for placement in placements {
        match placement {
            GuildPlacement::Folder(folder) => {
                let folder_node = Node::new(ids.next(), NodeRef::None, folder_label(folder))
                    .with_expanded(options.auto_expand_folders);
                let folder_node = root.push_child(folder_node);
                add_folder_guilds(directory, folder, folder_node, &mut ids, &mut placed).await;
            }
            GuildPlacement::Standalone(guild_id) => {
                add_guild(directory, *guild_id, &mut root, &mut ids, &mut placed).await;
            }
        }
    }

    GuildTree {
        root,
        direct_messages,
        ids,
    }
}

async fn add_folder_guilds(
    directory: &dyn Directory,
    folder: &Folder,
    folder_node: &mut Node,
    ids: &mut NodeIds,
    placed: &mut HashSet<GuildId>,
) {
    for guild_id in &folder.guild_ids {
        add_guild(directory, *guild_id, folder_node, ids, placed).await;
    }
}

async fn add_guild(
    directory: &dyn Directory,
    guild_id: GuildId,
    parent: &mut Node,
    ids: &mut NodeIds,
    placed: &mut HashSet<GuildId>,
) {
    if placed.contains(&guild_id) {
        debug!(guild_id = guild_id.0, "guild already placed in tree");
        return;
    }

    let guild = match directory.guild_by_id(guild_id).await {
        Ok(guild) => guild,
        Err(err) => {
            info!(guild_id = guild_id.0, err = %err, "guild not found in directory");
            return;
        }
    };

    placed.insert(guild_id);
    parent.push_child(Node::new(ids.next(), NodeRef::Guild(guild.id), guild.name));
}

#[cfg(test)]
#[path = "tests/folders_tests.rs"]
mod tests;
