use crate::{
    keys::NavAction,
    node::{Node, NodeId},
};

/// Selected row over the visible rows of a tree.
#[derive(Debug, Default, Clone)]
pub struct TreeCursor {
    rows: Vec<NodeId>,
    selected: Option<usize>,
}

impl TreeCursor {
    /// Recomputes the rows, staying on the same node when it is still visible.
    pub fn sync(&mut self, root: &Node) {
        let previous = self.selected_node();
        let previous_index = self.selected;
        self.rows = root.visible_rows().into_iter().map(|row| row.id).collect();

        if self.rows.is_empty() {
            self.selected = None;
            return;
        }
        let last = self.rows.len() - 1;
        self.selected = previous
            .and_then(|id| self.rows.iter().position(|row| *row == id))
            .or(Some(previous_index.unwrap_or(0).min(last)));
    }

    pub fn rows(&self) -> &[NodeId] {
        &self.rows
    }

    pub fn selected_node(&self) -> Option<NodeId> {
        self.selected.and_then(|index| self.rows.get(index).copied())
    }

    pub fn select(&mut self, node: NodeId) -> bool {
        match self.rows.iter().position(|row| *row == node) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }

    /// Moves the selection and returns the node now under the cursor.
    pub fn apply(&mut self, action: NavAction) -> Option<NodeId> {
        let Some(last) = self.rows.len().checked_sub(1) else {
            return None;
        };
        let current = self.selected.unwrap_or(0);
        self.selected = Some(match action {
            NavAction::SelectPrevious => current.saturating_sub(1),
            NavAction::SelectNext => (current + 1).min(last),
            NavAction::SelectFirst => 0,
            NavAction::SelectLast => last,
            NavAction::SelectCurrent => current.min(last),
        });
        self.selected_node()
    }
}
