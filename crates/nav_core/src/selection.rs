//! Reacts to node activation: expands, lazily populates, or switches the
//! active conversation.
//!
//! The controller owns the tree. Directory work happens elsewhere; a
//! population request goes out as a [`PopulateRequest`] and comes back as a
//! [`PopulateCompletion`] which must be applied on the owning task.

use std::collections::HashSet;

use shared::domain::{Channel, ChannelId, GuildId};
use tracing::{debug, error, warn};

use crate::{
    error::NavError,
    folders::GuildTree,
    hierarchy::{resolve_guild_channels, resolve_private_channels},
    node::{Node, NodeId, NodeIds, NodeRef},
    permissions::Visibility,
    CompositionInput, ConversationView, FocusManager,
};

/// Focus target that receives input after a channel is opened.
pub const MESSAGE_INPUT: &str = "message_input";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    GuildOpen(GuildId),
    ChannelActive(ChannelId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopulateRequest {
    Guild { node: NodeId, guild_id: GuildId },
    PrivateChannels { node: NodeId },
}

impl PopulateRequest {
    pub fn node(&self) -> NodeId {
        match self {
            PopulateRequest::Guild { node, .. } | PopulateRequest::PrivateChannels { node } => *node,
        }
    }
}

#[derive(Debug)]
pub enum PopulateOutcome {
    /// Sorted by position, with the viewer's visibility already resolved.
    GuildChannels {
        channels: Vec<Channel>,
        visibility: Visibility,
    },
    PrivateChannels(Vec<Channel>),
}

#[derive(Debug)]
pub struct PopulateCompletion {
    pub request: PopulateRequest,
    pub result: Result<PopulateOutcome, NavError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Ignored,
    Toggled { expanded: bool },
    Populate(PopulateRequest),
    AlreadyPending,
    ChannelOpened(ChannelId),
}

pub struct Collaborators {
    pub conversation: Box<dyn ConversationView>,
    pub composition: Box<dyn CompositionInput>,
    pub focus: Box<dyn FocusManager>,
}

pub struct SelectionController {
    root: Node,
    direct_messages: Option<NodeId>,
    ids: NodeIds,
    state: SelectionState,
    pending: HashSet<NodeId>,
    collaborators: Collaborators,
}

impl SelectionController {
    pub fn new(tree: GuildTree, collaborators: Collaborators) -> Self {
        Self {
            root: tree.root,
            direct_messages: tree.direct_messages,
            ids: tree.ids,
            state: SelectionState::Idle,
            pending: HashSet::new(),
            collaborators,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn direct_messages(&self) -> Option<NodeId> {
        self.direct_messages
    }

    pub fn is_pending(&self, node: NodeId) -> bool {
        self.pending.contains(&node)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn activate(&mut self, node_id: NodeId) -> Activation {
        let direct_messages = self.direct_messages;
        let Some(node) = self.root.find_mut(node_id) else {
            warn!(node_id = node_id.0, "activation of unknown node");
            return Activation::Ignored;
        };

        if !node.children().is_empty() {
            let expanded = node.toggle_expanded();
            let lazily_populated = matches!(node.reference(), NodeRef::Guild(_))
                || Some(node_id) == direct_messages;
            if !expanded && lazily_populated {
                node.clear_children();
            }
            return Activation::Toggled { expanded };
        }

        let reference = node.reference();
        let title = node.label().to_string();
        match reference {
            NodeRef::Guild(guild_id) => self.request_population(PopulateRequest::Guild {
                node: node_id,
                guild_id,
            }),
            NodeRef::Channel(channel_id) => {
                self.open_channel(channel_id, &title);
                Activation::ChannelOpened(channel_id)
            }
            NodeRef::None if Some(node_id) == direct_messages => {
                self.request_population(PopulateRequest::PrivateChannels { node: node_id })
            }
            NodeRef::None => Activation::Ignored,
        }
    }

    /// Expands every ancestor of `node_id` so it becomes a visible row.
    pub fn expand_ancestors(&mut self, node_id: NodeId) -> bool {
        let Some(path) = self.root.path_to(node_id) else {
            return false;
        };
        for ancestor in &path[..path.len() - 1] {
            if let Some(node) = self.root.find_mut(*ancestor) {
                node.set_expanded(true);
            }
        }
        true
    }

    /// Applies a finished population. Returns whether the tree changed.
    pub fn apply(&mut self, completion: PopulateCompletion) -> bool {
        let PopulateCompletion { request, result } = completion;
        let node_id = request.node();
        self.pending.remove(&node_id);

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                match &request {
                    PopulateRequest::Guild { guild_id, .. } => {
                        error!(guild_id = guild_id.0, err = %err, "failed to get channels")
                    }
                    PopulateRequest::PrivateChannels { .. } => {
                        error!(err = %err, "failed to get private channels")
                    }
                }
                return false;
            }
        };

        let Some(node) = self.root.find_mut(node_id) else {
            debug!(node_id = node_id.0, "dropping population for a node no longer in the tree");
            return false;
        };
        if !node.children().is_empty() {
            debug!(node_id = node_id.0, "node already populated");
            return false;
        }

        let children = match outcome {
            PopulateOutcome::GuildChannels {
                channels,
                visibility,
            } => resolve_guild_channels(&channels, &visibility, &mut self.ids),
            PopulateOutcome::PrivateChannels(channels) => {
                resolve_private_channels(&channels, &mut self.ids)
            }
        };
        node.replace_children(children);
        node.set_expanded(true);

        if let PopulateRequest::Guild { guild_id, .. } = request {
            self.state = SelectionState::GuildOpen(guild_id);
        }
        true
    }

    fn request_population(&mut self, request: PopulateRequest) -> Activation {
        if !self.pending.insert(request.node()) {
            debug!(node_id = request.node().0, "population already in flight");
            return Activation::AlreadyPending;
        }
        Activation::Populate(request)
    }

    fn open_channel(&mut self, channel_id: ChannelId, title: &str) {
        self.collaborators.conversation.reset();
        self.collaborators.composition.reset();

        self.collaborators
            .conversation
            .display_conversation(channel_id);
        self.collaborators.conversation.set_title(title);
        self.state = SelectionState::ChannelActive(channel_id);
        self.collaborators.focus.request_focus(MESSAGE_INPUT);
    }
}

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod tests;
