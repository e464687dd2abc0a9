use async_trait::async_trait;
use shared::{
    domain::{Channel, ChannelId, Guild, GuildId, Permissions, UserId},
    error::DirectoryError,
};

pub mod cursor;
pub mod error;
pub mod folders;
pub mod hierarchy;
pub mod keys;
pub mod labels;
pub mod memory;
pub mod navigator;
pub mod node;
pub mod permissions;
pub mod selection;

pub use cursor::TreeCursor;
pub use error::NavError;
pub use folders::{build_guild_tree, GuildTree, TreeOptions};
pub use keys::{KeyBindings, KeyOutcome, NavAction};
pub use memory::{DirectorySnapshot, MemoryDirectory};
pub use navigator::{KeyResult, Navigator, NavigatorOptions, DEFAULT_FETCH_TIMEOUT};
pub use node::{Node, NodeId, NodeRef};
pub use selection::{Activation, Collaborators, SelectionController, SelectionState};

/// Read access to guilds, channels and permissions.
///
/// Implementations may reach a remote service; callers run them off the
/// task that owns the tree and hand results back as completions.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn guild_by_id(&self, guild_id: GuildId) -> Result<Guild, DirectoryError>;
    async fn channels_of_guild(&self, guild_id: GuildId) -> Result<Vec<Channel>, DirectoryError>;
    async fn channel_by_id(&self, channel_id: ChannelId) -> Result<Channel, DirectoryError>;
    async fn private_channels(&self) -> Result<Vec<Channel>, DirectoryError>;
    async fn permissions_of(
        &self,
        channel_id: ChannelId,
        user_id: UserId,
    ) -> Result<Permissions, DirectoryError>;
    async fn current_user_id(&self) -> Result<UserId, DirectoryError>;
}

pub struct MissingDirectory;

#[async_trait]
impl Directory for MissingDirectory {
    async fn guild_by_id(&self, guild_id: GuildId) -> Result<Guild, DirectoryError> {
        Err(DirectoryError::lookup_failure(format!(
            "directory unavailable for guild {}",
            guild_id.0
        )))
    }

    async fn channels_of_guild(&self, guild_id: GuildId) -> Result<Vec<Channel>, DirectoryError> {
        Err(DirectoryError::lookup_failure(format!(
            "directory unavailable for guild {}",
            guild_id.0
        )))
    }

    async fn channel_by_id(&self, channel_id: ChannelId) -> Result<Channel, DirectoryError> {
        Err(DirectoryError::lookup_failure(format!(
            "directory unavailable for channel {}",
            channel_id.0
        )))
    }

    async fn private_channels(&self) -> Result<Vec<Channel>, DirectoryError> {
        Err(DirectoryError::lookup_failure("directory unavailable"))
    }

    async fn permissions_of(
        &self,
        channel_id: ChannelId,
        _user_id: UserId,
    ) -> Result<Permissions, DirectoryError> {
        Err(DirectoryError::lookup_failure(format!(
            "directory unavailable for channel {}",
            channel_id.0
        )))
    }

    async fn current_user_id(&self) -> Result<UserId, DirectoryError> {
        Err(DirectoryError::lookup_failure("directory unavailable"))
    }
}

/// Surface that shows the active conversation.
pub trait ConversationView: Send {
    fn reset(&mut self);
    fn display_conversation(&mut self, channel_id: ChannelId);
    fn set_title(&mut self, title: &str);
}

/// Surface holding unsent message text.
pub trait CompositionInput: Send {
    fn reset(&mut self);
}

pub trait FocusManager: Send {
    fn request_focus(&mut self, surface: &str);
}
