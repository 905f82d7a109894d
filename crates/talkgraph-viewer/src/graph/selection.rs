use bevy::prelude::Resource;
use std::collections::HashMap;
use talkgraph_core::NodeId;

/// The set of selected node ids, with a display label carried per member.
/// Membership is the only meaningful state; equality is by id. The set is
/// deliberately decoupled from the snapshot lifecycle so selection survives
/// view switches and graph replacement as long as ids persist.
#[derive(Default, Resource)]
pub struct SelectionSet {
    members: HashMap<NodeId, String>,
}

impl SelectionSet {
    /// Adds the node if absent, removes it if present. Returns whether the
    /// node is selected afterwards.
    pub fn toggle(&mut self, id: NodeId, label: impl Into<String>) -> bool {
        if self.members.remove(&id).is_some() {
            false
        } else {
            self.members.insert(id, label.into());
            true
        }
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn is_selected(&self, id: &NodeId) -> bool {
        self.members.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// No iteration-order guarantee.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &str)> {
        self.members.iter().map(|(id, label)| (id, label.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_an_involution() {
        let mut sel = SelectionSet::default();
        sel.toggle(NodeId::new("a"), "A");

        sel.toggle(NodeId::new("b"), "B");
        sel.toggle(NodeId::new("b"), "B");

        assert!(sel.is_selected(&NodeId::new("a")));
        assert!(!sel.is_selected(&NodeId::new("b")));
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn toggle_reports_resulting_membership() {
        let mut sel = SelectionSet::default();
        assert!(sel.toggle(NodeId::new("a"), "A"));
        assert!(!sel.toggle(NodeId::new("a"), "A"));
    }

    #[test]
    fn clear_empties_unconditionally() {
        let mut sel = SelectionSet::default();
        sel.toggle(NodeId::new("a"), "A");
        sel.toggle(NodeId::new("b"), "B");
        sel.clear();
        assert!(sel.is_empty());
    }

    #[test]
    fn selection_survives_snapshot_replace() {
        use crate::graph::store::GraphStore;
        use talkgraph_core::{GraphPayload, NodeKind, WireNode};

        let mut store = GraphStore::default();
        let mut sel = SelectionSet::default();
        sel.toggle(NodeId::new("a"), "A");
        sel.toggle(NodeId::new("b"), "B");

        // New snapshot keeps "b" only.
        store.replace(GraphPayload {
            nodes: vec![WireNode {
                id: NodeId::new("b"),
                label: "B".into(),
                kind: NodeKind::Agent,
                content: None,
            }],
            links: vec![],
        });

        // Membership is untouched by the replace; only ids still present in
        // the snapshot render highlighted.
        assert!(sel.is_selected(&NodeId::new("a")));
        assert!(sel.is_selected(&NodeId::new("b")));
        let highlighted = |id: &NodeId| sel.is_selected(id) && store.contains(id);
        assert!(!highlighted(&NodeId::new("a")));
        assert!(highlighted(&NodeId::new("b")));
    }
}
