use super::*;
use shared::domain::{ChannelId, Color, FolderId, GuildId, User, UserId};

fn channel(kind: ChannelKind, name: &str) -> Channel {
    Channel {
        id: ChannelId(1),
        kind,
        name: name.into(),
        guild_id: Some(GuildId(1)),
        parent_id: None,
        position: 0,
        recipients: Vec::new(),
    }
}

fn recipient(id: i64, username: &str, display_name: Option<&str>) -> User {
    User {
        id: UserId(id),
        username: username.into(),
        discriminator: None,
        display_name: display_name.map(Into::into),
    }
}

#[test]
fn guild_channel_prefixes() {
    assert_eq!(channel_label(&channel(ChannelKind::Text, "chat")), "#chat");
    assert_eq!(channel_label(&channel(ChannelKind::Voice, "lounge")), "v-lounge");
    assert_eq!(channel_label(&channel(ChannelKind::Announcement, "news")), "a-news");
    assert_eq!(channel_label(&channel(ChannelKind::Store, "shop")), "s-shop");
    assert_eq!(channel_label(&channel(ChannelKind::Forum, "help")), "f-help");
}

#[test]
fn categories_and_unknown_kinds_keep_raw_name() {
    assert_eq!(channel_label(&channel(ChannelKind::Category, "General")), "General");
    assert_eq!(channel_label(&channel(ChannelKind::Other, "stage")), "stage");
}

#[test]
fn direct_message_uses_recipient_tag() {
    let mut dm = channel(ChannelKind::DirectMessage, "");
    dm.recipients.push(User {
        id: UserId(2),
        username: "carol".into(),
        discriminator: Some("0420".into()),
        display_name: Some("Carol".into()),
    });
    assert_eq!(channel_label(&dm), "carol#0420");
}

#[test]
fn direct_message_without_recipients_falls_back_to_name() {
    let dm = channel(ChannelKind::DirectMessage, "ghost");
    assert_eq!(channel_label(&dm), "ghost");
}

#[test]
fn unnamed_group_dm_joins_recipient_names() {
    let mut group = channel(ChannelKind::GroupDm, "");
    group.recipients = vec![recipient(2, "alice", None), recipient(3, "bob", None)];
    assert_eq!(channel_label(&group), "alice, bob");

    group.recipients[1].display_name = Some("Bobby".into());
    assert_eq!(channel_label(&group), "alice, Bobby");
}

#[test]
fn named_group_dm_keeps_its_name() {
    let mut group = channel(ChannelKind::GroupDm, "weekend plans");
    group.recipients = vec![recipient(2, "alice", None)];
    assert_eq!(channel_label(&group), "weekend plans");
}

#[test]
fn folder_labels() {
    let mut folder = Folder {
        id: Some(FolderId(5)),
        name: None,
        color: Some(Color(0x00FF00)),
        guild_ids: Vec::new(),
    };
    assert_eq!(folder_label(&folder), "Folder");

    folder.name = Some(String::new());
    assert_eq!(folder_label(&folder), "Folder");

    folder.name = Some("games".into());
    assert_eq!(folder_label(&folder), "[#00FF00]games[-]");

    folder.color = None;
    assert_eq!(folder_label(&folder), "games");
}
