//! Display nodes of the navigation tree.

use shared::domain::{ChannelId, GuildId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Hands out node ids that stay unique for the lifetime of one tree.
#[derive(Debug, Default)]
pub struct NodeIds {
    last: u64,
}

impl NodeIds {
    pub fn next(&mut self) -> NodeId {
        self.last += 1;
        NodeId(self.last)
    }
}

/// What a node points at. Folders, the root and the direct-messages root carry `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Guild(GuildId),
    Channel(ChannelId),
    None,
}

#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    reference: NodeRef,
    label: String,
    children: Vec<Node>,
    expanded: bool,
}

/// A node flattened into a visible row. Depth 0 is a direct child of the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    pub id: NodeId,
    pub depth: usize,
    pub label: String,
}

/// Id-free structural view of a subtree, for comparing two builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeShape {
    pub reference: NodeRef,
    pub label: String,
    pub expanded: bool,
    pub children: Vec<NodeShape>,
}

impl Node {
    pub fn new(id: NodeId, reference: NodeRef, label: impl Into<String>) -> Self {
        Self {
            id,
            reference,
            label: label.into(),
            children: Vec::new(),
            expanded: false,
        }
    }

    pub fn root(id: NodeId) -> Self {
        let mut root = Self::new(id, NodeRef::None, "");
        root.expanded = true;
        root
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn reference(&self) -> NodeRef {
        self.reference
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    /// Flips the expand flag and returns the new value.
    pub fn toggle_expanded(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    pub fn push_child(&mut self, child: Node) -> &mut Node {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn replace_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    pub fn find(&self, id: NodeId) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// First node in pre-order carrying `reference`.
    pub fn find_by_reference(&self, reference: NodeRef) -> Option<&Node> {
        if self.reference == reference {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_by_reference(reference))
    }

    /// Ids from this node down to `id`, both ends included.
    pub fn path_to(&self, id: NodeId) -> Option<Vec<NodeId>> {
        if self.id == id {
            return Some(vec![self.id]);
        }
        self.children.iter().find_map(|child| {
            child.path_to(id).map(|mut path| {
                path.insert(0, self.id);
                path
            })
        })
    }

    /// Rows reachable through expanded nodes. The node itself is not a row.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        for child in &self.children {
            child.collect_visible(0, &mut rows);
        }
        rows
    }

    fn collect_visible(&self, depth: usize, rows: &mut Vec<VisibleRow>) {
        rows.push(VisibleRow {
            id: self.id,
            depth,
            label: self.label.clone(),
        });
        if self.expanded {
            for child in &self.children {
                child.collect_visible(depth + 1, rows);
            }
        }
    }

    /// Indented labels of the visible rows, two spaces per level.
    pub fn outline(&self) -> Vec<String> {
        self.visible_rows()
            .into_iter()
            .map(|row| format!("{}{}", "  ".repeat(row.depth), row.label))
            .collect()
    }

    pub fn shape(&self) -> NodeShape {
        NodeShape {
            reference: self.reference,
            label: self.label.clone(),
            expanded: self.expanded,
            children: self.children.iter().map(Node::shape).collect(),
        }
    }
}

#[cfg(test)]
#[path = "tests/node_tests.rs"]
mod tests;
