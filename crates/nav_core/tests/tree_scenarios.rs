mod common;

use common::{guild_channel, user};
use nav_core::{
    hierarchy::{resolve_guild_channels, resolve_private_channels},
    node::{Node, NodeIds},
    permissions::visibility_for,
    MemoryDirectory,
};
use shared::domain::{Channel, ChannelId, ChannelKind, Permissions, UserId};

async fn resolve(directory: &MemoryDirectory, channels: &[Channel]) -> Vec<String> {
    let visibility = visibility_for(directory, UserId(1), channels).await;
    let mut ids = NodeIds::default();
    let mut root = Node::root(ids.next());
    root.replace_children(resolve_guild_channels(channels, &visibility, &mut ids));
    root.outline()
}

fn general_with_chat() -> Vec<Channel> {
    vec![
        guild_channel(1, ChannelKind::Category, "General", None, 0),
        guild_channel(2, ChannelKind::Text, "chat", Some(1), 0),
    ]
}

#[tokio::test]
async fn visible_child_sits_under_its_category() {
    let directory = MemoryDirectory::new(UserId(1));
    assert_eq!(
        resolve(&directory, &general_with_chat()).await,
        vec!["General", "  #chat"]
    );
}

#[tokio::test]
async fn category_stays_when_its_only_child_is_denied() {
    let directory =
        MemoryDirectory::new(UserId(1)).with_permissions(ChannelId(2), Permissions::NONE);
    assert_eq!(
        resolve(&directory, &general_with_chat()).await,
        vec!["General"]
    );
}

#[tokio::test]
async fn permission_failure_hides_the_channel_but_not_the_category() {
    let directory = MemoryDirectory::new(UserId(1)).with_permission_failure(ChannelId(2));
    assert_eq!(
        resolve(&directory, &general_with_chat()).await,
        vec!["General"]
    );
}

#[tokio::test]
async fn orphans_keep_their_sorted_order() {
    let directory = MemoryDirectory::new(UserId(1));
    let channels = vec![
        guild_channel(3, ChannelKind::Text, "first", None, 1),
        guild_channel(4, ChannelKind::Text, "second", None, 2),
    ];
    assert_eq!(
        resolve(&directory, &channels).await,
        vec!["#first", "#second"]
    );
}

#[test]
fn unnamed_group_dm_lists_its_recipients() {
    let group = Channel {
        id: ChannelId(9),
        kind: ChannelKind::GroupDm,
        name: String::new(),
        guild_id: None,
        parent_id: None,
        position: 0,
        recipients: vec![user(2, "alice"), user(3, "bob")],
    };
    let mut ids = NodeIds::default();
    let nodes = resolve_private_channels(&[group], &mut ids);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].label(), "alice, bob");
}

#[tokio::test]
async fn resolving_twice_gives_the_same_shape() {
    let directory = MemoryDirectory::new(UserId(1)).with_permissions(ChannelId(6), Permissions::NONE);
    let channels = vec![
        guild_channel(1, ChannelKind::Text, "welcome", None, 0),
        guild_channel(2, ChannelKind::Category, "Voice", None, 1),
        guild_channel(3, ChannelKind::Category, "Empty", None, 2),
        guild_channel(4, ChannelKind::Voice, "lounge", Some(2), 3),
        guild_channel(5, ChannelKind::Text, "lost", Some(77), 4),
        guild_channel(6, ChannelKind::Voice, "staff", Some(2), 5),
    ];
    let visibility = visibility_for(&directory, UserId(1), &channels).await;

    let shapes: Vec<_> = (0..2)
        .map(|_| {
            let mut ids = NodeIds::default();
            let mut root = Node::root(ids.next());
            root.replace_children(resolve_guild_channels(&channels, &visibility, &mut ids));
            root.shape()
        })
        .collect();
    assert_eq!(shapes[0], shapes[1]);

    let mut ids = NodeIds::default();
    let mut root = Node::root(ids.next());
    root.replace_children(resolve_guild_channels(&channels, &visibility, &mut ids));
    assert_eq!(root.outline(), vec!["#welcome", "Voice", "  v-lounge"]);
}
