use bevy::prelude::Resource;
use std::collections::HashMap;
use talkgraph_core::{GraphPayload, NodeId, NodeKind};

#[derive(Debug, Clone)]
pub struct GraphNode {
    pub id: NodeId,
    pub label: String,
    pub kind: NodeKind,
    pub content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GraphLink {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: String,
}

/// Single source of truth for the current snapshot. Every update is a full
/// replace; consumers never observe a partially-applied snapshot because
/// `replace` runs as one event-loop task.
#[derive(Default, Resource)]
pub struct GraphStore {
    nodes: Vec<GraphNode>,
    index: HashMap<NodeId, usize>,
    links: Vec<GraphLink>,
    revision: u64,
}

impl GraphStore {
    pub fn replace(&mut self, payload: GraphPayload) {
        self.nodes.clear();
        self.index.clear();
        self.links.clear();

        for n in payload.nodes {
            if self.index.contains_key(&n.id) {
                tracing::warn!(id = %n.id.0, "duplicate node id in snapshot, keeping first");
                continue;
            }
            self.index.insert(n.id.clone(), self.nodes.len());
            self.nodes.push(GraphNode {
                id: n.id,
                label: n.label,
                kind: n.kind,
                content: n.content,
            });
        }

        // Links are stored as received; consumers skip dangling endpoints.
        self.links = payload
            .links
            .into_iter()
            .map(|l| GraphLink {
                source: l.source,
                target: l.target,
                kind: l.kind,
            })
            .collect();

        self.revision = self.revision.wrapping_add(1);
    }

    pub fn get(&self, id: &NodeId) -> Option<&GraphNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[GraphLink] {
        &self.links
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Bumped on every replace; the renderer rebuilds its entities when
    /// this changes rather than diffing node lists.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talkgraph_core::{WireLink, WireNode};

    fn node(id: &str, kind: NodeKind) -> WireNode {
        WireNode {
            id: NodeId::new(id),
            label: format!("{}: {id}", kind.as_str()),
            kind,
            content: None,
        }
    }

    #[test]
    fn replace_matches_payload_exactly_and_drops_unlisted() {
        let mut store = GraphStore::default();
        store.replace(GraphPayload {
            nodes: vec![node("a", NodeKind::User), node("b", NodeKind::Agent)],
            links: vec![],
        });
        assert!(store.contains(&NodeId::new("a")));

        store.replace(GraphPayload {
            nodes: vec![node("b", NodeKind::Agent), node("c", NodeKind::Message)],
            links: vec![WireLink {
                source: NodeId::new("b"),
                target: NodeId::new("c"),
                kind: "SENT".into(),
            }],
        });

        assert!(!store.contains(&NodeId::new("a")));
        assert!(store.contains(&NodeId::new("b")));
        assert!(store.contains(&NodeId::new("c")));
        assert_eq!(store.node_count(), 2);
        assert_eq!(store.link_count(), 1);
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let mut store = GraphStore::default();
        let mut dup = node("a", NodeKind::Agent);
        dup.label = "second".into();
        store.replace(GraphPayload {
            nodes: vec![node("a", NodeKind::User), dup],
            links: vec![],
        });

        assert_eq!(store.node_count(), 1);
        assert_eq!(store.get(&NodeId::new("a")).unwrap().kind, NodeKind::User);
    }

    #[test]
    fn revision_bumps_on_replace() {
        let mut store = GraphStore::default();
        let r0 = store.revision();
        store.replace(GraphPayload::default());
        assert_ne!(store.revision(), r0);
    }
}
