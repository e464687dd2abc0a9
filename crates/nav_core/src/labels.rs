//! Display labels for tree entries.
//!
//! Channel labels double as the title of the active conversation, so the
//! prefixes here are part of the visible contract.

use shared::domain::{Channel, ChannelKind, Folder};

pub const DIRECT_MESSAGES_LABEL: &str = "Direct Messages";
pub const FOLDER_PLACEHOLDER: &str = "Folder";

pub fn channel_label(channel: &Channel) -> String {
    match channel.kind {
        ChannelKind::Text => format!("#{}", channel.name),
        ChannelKind::Voice => format!("v-{}", channel.name),
        ChannelKind::Announcement => format!("a-{}", channel.name),
        ChannelKind::Store => format!("s-{}", channel.name),
        ChannelKind::Forum => format!("f-{}", channel.name),
        ChannelKind::DirectMessage => match channel.recipients.first() {
            Some(recipient) => recipient.tag(),
            None => channel.name.clone(),
        },
        ChannelKind::GroupDm if channel.name.is_empty() => channel
            .recipients
            .iter()
            .map(|recipient| recipient.display_or_username())
            .collect::<Vec<_>>()
            .join(", "),
        ChannelKind::GroupDm | ChannelKind::Category | ChannelKind::Other => channel.name.clone(),
    }
}

/// Named folders carry their color as a `[#RRGGBB]name[-]` markup tag.
pub fn folder_label(folder: &Folder) -> String {
    match (folder.name.as_deref(), folder.color) {
        (None | Some(""), _) => FOLDER_PLACEHOLDER.to_string(),
        (Some(name), Some(color)) => format!("[{color}]{name}[-]"),
        (Some(name), None) => name.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/labels_tests.rs"]
mod tests;
