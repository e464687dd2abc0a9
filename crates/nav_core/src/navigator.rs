use std::{panic::AssertUnwindSafe, sync::Arc, time::Duration};

use futures::FutureExt;
use shared::domain::{ChannelId, GuildPlacement};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    cursor::TreeCursor,
    error::NavError,
    folders::{build_guild_tree, TreeOptions},
    keys::{KeyBindings, KeyOutcome, NavAction},
    node::{Node, NodeId, NodeRef},
    permissions::visibility_for,
    selection::{
        Activation, Collaborators, PopulateCompletion, PopulateOutcome, PopulateRequest,
        SelectionController, SelectionState,
    },
    Directory,
};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct NavigatorOptions {
    pub tree: TreeOptions,
    pub keys: KeyBindings,
    pub fetch_timeout: Duration,
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        Self {
            tree: TreeOptions::default(),
            keys: KeyBindings::default(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult {
    Moved(Option<NodeId>),
    Activated(Activation),
    PassThrough(String),
}

/// Owns the tree and drives it from key presses and directory completions.
///
/// Fetches run on spawned tasks; their results come back over a channel and
/// are applied by [`Navigator::pump`] or [`Navigator::settle`] on the task
/// that owns the navigator.
pub struct Navigator {
    controller: SelectionController,
    directory: Arc<dyn Directory>,
    keys: KeyBindings,
    cursor: TreeCursor,
    fetch_timeout: Duration,
    completions_tx: mpsc::UnboundedSender<PopulateCompletion>,
    completions_rx: mpsc::UnboundedReceiver<PopulateCompletion>,
}

impl Navigator {
    pub async fn build(
        directory: Arc<dyn Directory>,
        placements: &[GuildPlacement],
        options: NavigatorOptions,
        collaborators: Collaborators,
    ) -> Self {
        let tree = build_guild_tree(directory.as_ref(), placements, options.tree).await;
        let controller = SelectionController::new(tree, collaborators);
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let mut navigator = Self {
            controller,
            directory,
            keys: options.keys,
            cursor: TreeCursor::default(),
            fetch_timeout: options.fetch_timeout,
            completions_tx,
            completions_rx,
        };
        navigator.resync();
        navigator
    }

    pub fn root(&self) -> &Node {
        self.controller.root()
    }

    pub fn state(&self) -> SelectionState {
        self.controller.state()
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.cursor.selected_node()
    }

    pub fn outline(&self) -> Vec<String> {
        self.controller.root().outline()
    }

    pub fn has_pending(&self) -> bool {
        self.controller.has_pending()
    }

    pub fn activate(&mut self, node: NodeId) -> Activation {
        let activation = self.controller.activate(node);
        if let Activation::Populate(request) = &activation {
            self.spawn_fetch(request.clone());
        }
        self.resync();
        activation
    }

    pub fn handle_key(&mut self, key_name: &str) -> KeyResult {
        match self.keys.translate(key_name) {
            KeyOutcome::PassThrough(name) => KeyResult::PassThrough(name),
            KeyOutcome::Action(NavAction::SelectCurrent) => match self.cursor.selected_node() {
                Some(node) => KeyResult::Activated(self.activate(node)),
                None => KeyResult::Activated(Activation::Ignored),
            },
            KeyOutcome::Action(action) => KeyResult::Moved(self.cursor.apply(action)),
        }
    }

    /// Applies completions that already arrived. Never waits.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            if self.controller.apply(completion) {
                applied += 1;
            }
        }
        self.resync();
        applied
    }

    /// Waits until every outstanding fetch has been applied.
    pub async fn settle(&mut self) {
        while self.controller.has_pending() {
            match self.completions_rx.recv().await {
                Some(completion) => {
                    self.controller.apply(completion);
                }
                None => break,
            }
        }
        self.resync();
    }

    /// Populates whatever holds the channel, then opens it.
    pub async fn reveal_channel(&mut self, channel_id: ChannelId) -> bool {
        let channel = match self.directory.channel_by_id(channel_id).await {
            Ok(channel) => channel,
            Err(err) if err.is_not_found() => {
                info!(channel_id = channel_id.0, "channel not found in directory");
                return false;
            }
            Err(err) => {
                error!(channel_id = channel_id.0, err = %err, "failed to get channel");
                return false;
            }
        };

        let owner = match channel.guild_id {
            Some(guild_id) if !channel.kind.is_private() => self
                .controller
                .root()
                .find_by_reference(NodeRef::Guild(guild_id))
                .map(Node::id),
            _ => self.controller.direct_messages(),
        };
        let Some(owner) = owner else {
            info!(channel_id = channel_id.0, "channel owner is not in the tree");
            return false;
        };
        self.ensure_populated(owner).await;

        let Some(node) = self
            .controller
            .root()
            .find_by_reference(NodeRef::Channel(channel_id))
            .map(Node::id)
        else {
            debug!(channel_id = channel_id.0, "channel is not visible to the viewer");
            return false;
        };
        self.controller.expand_ancestors(node);
        self.resync();
        self.cursor.select(node);
        matches!(self.activate(node), Activation::ChannelOpened(_))
    }

    async fn ensure_populated(&mut self, owner: NodeId) {
        let populated = self
            .controller
            .root()
            .find(owner)
            .is_some_and(|node| !node.children().is_empty());
        if !populated && !self.controller.is_pending(owner) {
            self.activate(owner);
        }
        self.settle().await;
    }

    fn spawn_fetch(&self, request: PopulateRequest) {
        let directory = Arc::clone(&self.directory);
        let completions = self.completions_tx.clone();
        let limit = self.fetch_timeout;
        tokio::spawn(async move {
            let fetch = fetch_population(directory.as_ref(), &request, limit);
            // A panicking directory must still clear the pending mark.
            let result = match AssertUnwindSafe(fetch).catch_unwind().await {
                Ok(result) => result,
                Err(_) => Err(NavError::FetchAborted),
            };
            if completions
                .send(PopulateCompletion { request, result })
                .is_err()
            {
                debug!("navigator dropped before fetch completed");
            }
        });
    }

    fn resync(&mut self) {
        self.cursor.sync(self.controller.root());
    }
}

/// Loads what a population request needs, bounded by `limit`.
///
/// Guild channels are sorted by position here; the resolver relies on it.
pub async fn fetch_population(
    directory: &dyn Directory,
    request: &PopulateRequest,
    limit: Duration,
) -> Result<PopulateOutcome, NavError> {
    match tokio::time::timeout(limit, fetch(directory, request)).await {
        Ok(result) => result,
        Err(_) => Err(NavError::FetchTimedOut { after: limit }),
    }
}

async fn fetch(
    directory: &dyn Directory,
    request: &PopulateRequest,
) -> Result<PopulateOutcome, NavError> {
    match request {
        PopulateRequest::Guild { guild_id, .. } => {
            let mut channels = directory.channels_of_guild(*guild_id).await?;
            channels.sort_by_key(|channel| channel.position);
            let viewer = directory.current_user_id().await?;
            let visibility = visibility_for(directory, viewer, &channels).await;
            Ok(PopulateOutcome::GuildChannels {
                channels,
                visibility,
            })
        }
        PopulateRequest::PrivateChannels { .. } => Ok(PopulateOutcome::PrivateChannels(
            directory.private_channels().await?,
        )),
    }
}

#[cfg(test)]
#[path = "tests/navigator_tests.rs"]
mod tests;
