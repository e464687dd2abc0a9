use super::*;

fn sample() -> (Node, NodeId, NodeId, NodeId) {
    let mut ids = NodeIds::default();
    let mut root = Node::root(ids.next());
    let folder = root.push_child(Node::new(ids.next(), NodeRef::None, "Folder").with_expanded(true));
    let folder_id = folder.id();
    let guild = folder.push_child(Node::new(ids.next(), NodeRef::Guild(GuildId(1)), "guild"));
    let guild_id = guild.id();
    let channel = guild.push_child(Node::new(ids.next(), NodeRef::Channel(ChannelId(9)), "#chat"));
    let channel_id = channel.id();
    (root, folder_id, guild_id, channel_id)
}

#[test]
fn ids_are_unique_and_increasing() {
    let mut ids = NodeIds::default();
    let first = ids.next();
    let second = ids.next();
    assert!(second > first);
}

#[test]
fn root_is_hidden_from_visible_rows() {
    let (root, folder_id, guild_id, _) = sample();
    let rows = root.visible_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, folder_id);
    assert_eq!(rows[0].depth, 0);
    assert_eq!(rows[1].id, guild_id);
    assert_eq!(rows[1].depth, 1);
}

#[test]
fn collapsed_children_are_not_visible_until_expanded() {
    let (mut root, _, guild_id, channel_id) = sample();
    assert!(root.visible_rows().iter().all(|row| row.id != channel_id));

    root.find_mut(guild_id).expect("guild").set_expanded(true);
    assert_eq!(root.outline(), vec!["Folder", "  guild", "    #chat"]);
}

#[test]
fn lookup_by_reference_and_path() {
    let (root, folder_id, guild_id, channel_id) = sample();
    let found = root
        .find_by_reference(NodeRef::Channel(ChannelId(9)))
        .expect("channel node");
    assert_eq!(found.id(), channel_id);
    assert!(root.find_by_reference(NodeRef::Guild(GuildId(2))).is_none());

    let path = root.path_to(channel_id).expect("path");
    assert_eq!(path, vec![root.id(), folder_id, guild_id, channel_id]);
    assert!(root.path_to(NodeId(999)).is_none());
}

#[test]
fn toggle_reports_new_state() {
    let (mut root, folder_id, _, _) = sample();
    let folder = root.find_mut(folder_id).expect("folder");
    assert!(!folder.toggle_expanded());
    assert!(folder.toggle_expanded());
}

#[test]
fn replacing_children_drops_the_old_subtree() {
    let (mut root, _, guild_id, channel_id) = sample();
    let mut ids = NodeIds { last: 100 };
    let guild = root.find_mut(guild_id).expect("guild");
    guild.replace_children(vec![Node::new(ids.next(), NodeRef::Channel(ChannelId(10)), "#new")]);
    assert!(root.find(channel_id).is_none());
    assert!(root.find_by_reference(NodeRef::Channel(ChannelId(10))).is_some());
}

#[test]
fn shapes_ignore_node_ids() {
    let (left, _, _, _) = sample();
    let (right, _, _, _) = sample();
    let mut ids = NodeIds { last: 50 };
    let mut other = Node::root(ids.next());
    other.push_child(Node::new(ids.next(), NodeRef::None, "Folder").with_expanded(true));
    assert_eq!(left.shape(), right.shape());
    assert_ne!(left.shape(), other.shape());
}
