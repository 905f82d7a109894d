use bevy::prelude::{Resource, Vec2};
use std::collections::HashMap;
use talkgraph_core::{NodeId, NodeKind};

use crate::graph::store::GraphStore;
use crate::render::style::node_radius;
use crate::util::ids::stable_u32;

/// Alpha target applied while a node is being dragged, so the layout keeps
/// reacting to the pinned node for the whole gesture.
pub const DRAG_ALPHA_TARGET: f32 = 0.3;

#[derive(Debug, Clone, Resource)]
pub struct LayoutParams {
    pub link_distance: f32,
    pub link_strength: f32,
    pub charge_strength: f32,
    pub center_strength: f32,
    pub collision_strength: f32,
    pub collision_enabled: bool,
    pub damping: f32,
    pub max_step: f32,
    pub alpha_decay: f32,
    pub alpha_min: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            link_distance: 60.0,
            link_strength: 0.6,
            charge_strength: 22_000.0,
            center_strength: 0.03,
            collision_strength: 0.5,
            collision_enabled: true,
            damping: 0.6,
            max_step: 15.0,
            alpha_decay: 0.04,
            alpha_min: 0.005,
        }
    }
}

/// Force-directed layout state, keyed by node id. The simulator owns
/// position-by-id; renderer and controller look positions up each tick, no
/// shared mutable node objects.
#[derive(Resource)]
pub struct LayoutState {
    positions: HashMap<NodeId, Vec2>,
    velocities: HashMap<NodeId, Vec2>,
    pinned: HashMap<NodeId, Vec2>,
    alpha: f32,
    alpha_target: f32,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            positions: HashMap::new(),
            velocities: HashMap::new(),
            pinned: HashMap::new(),
            alpha: 1.0,
            alpha_target: 0.0,
        }
    }
}

impl LayoutState {
    /// Effective position: an active pin overrides the simulated position.
    pub fn position(&self, id: &NodeId) -> Option<Vec2> {
        self.pinned
            .get(id)
            .or_else(|| self.positions.get(id))
            .copied()
    }

    pub fn pin(&mut self, id: &NodeId, at: Vec2) {
        if self.positions.contains_key(id) {
            self.pinned.insert(id.clone(), at);
        }
    }

    pub fn unpin(&mut self, id: &NodeId) {
        self.pinned.remove(id);
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_alpha_target(&mut self, target: f32) {
        self.alpha_target = target;
        if target > 0.0 {
            self.alpha = self.alpha.max(target);
        }
    }

    pub fn reheat(&mut self) {
        self.alpha = 1.0;
    }

    pub fn settled(&self, params: &LayoutParams) -> bool {
        self.alpha < params.alpha_min && self.alpha_target <= 0.0
    }

    /// Reconcile layout state with a freshly replaced snapshot: ids that
    /// persist keep position, velocity and pin; ids that vanished are
    /// dropped; new ids are seeded deterministically per kind.
    pub fn sync(&mut self, store: &GraphStore) {
        self.positions.retain(|id, _| store.contains(id));
        self.velocities.retain(|id, _| store.contains(id));
        self.pinned.retain(|id, _| store.contains(id));

        for node in store.nodes() {
            if self.positions.contains_key(&node.id) {
                continue;
            }
            self.positions
                .insert(node.id.clone(), seed_position(&node.id, node.kind));
            self.velocities.insert(node.id.clone(), Vec2::ZERO);
        }
    }

    /// One discrete simulation tick, invoked by the host's frame callback.
    /// Combines link attraction, pairwise repulsion, centering and
    /// radius-keyed collision, then integrates with damped velocities and a
    /// clamped step. A no-op once the energy has decayed below `alpha_min`.
    pub fn step(&mut self, store: &GraphStore, params: &LayoutParams) {
        if self.settled(params) {
            return;
        }

        let ids: Vec<(NodeId, f32)> = store
            .nodes()
            .iter()
            .filter(|n| self.positions.contains_key(&n.id))
            .map(|n| (n.id.clone(), node_radius(n.kind)))
            .collect();
        if ids.is_empty() {
            return;
        }

        self.alpha += (self.alpha_target - self.alpha) * params.alpha_decay;

        // Pins win before forces are measured, so a dragged node exerts
        // forces from where the pointer put it.
        for (id, at) in self.pinned.iter() {
            self.positions.insert(id.clone(), *at);
            self.velocities.insert(id.clone(), Vec2::ZERO);
        }

        let mut forces: HashMap<NodeId, Vec2> = HashMap::new();
        for (id, _) in ids.iter() {
            forces.insert(id.clone(), Vec2::ZERO);
        }

        // Many-body repulsion and collision over all pairs.
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                let (a, ra) = &ids[i];
                let (b, rb) = &ids[j];
                let pa = *self.positions.get(a).unwrap_or(&Vec2::ZERO);
                let pb = *self.positions.get(b).unwrap_or(&Vec2::ZERO);

                let delta = pa - pb;
                let dist2 = delta.length_squared().max(1.0);
                let mut dir = delta.normalize_or_zero();
                if dir == Vec2::ZERO {
                    // Exactly coincident pair: separate along a fixed axis.
                    dir = Vec2::X;
                }

                let mut f = (params.charge_strength / dist2) * dir;

                if params.collision_enabled {
                    let dist = delta.length();
                    let min_dist = ra + rb;
                    if dist < min_dist {
                        f += (min_dist - dist) * params.collision_strength * dir;
                    }
                }

                *forces.get_mut(a).unwrap() += f;
                *forces.get_mut(b).unwrap() -= f;
            }
        }

        // Link attraction toward the target separation. Dangling links are
        // skipped here rather than rejected upstream.
        for link in store.links() {
            let (Some(pa), Some(pb)) = (
                self.positions.get(&link.source).copied(),
                self.positions.get(&link.target).copied(),
            ) else {
                continue;
            };

            let delta = pb - pa;
            let len = delta.length().max(0.001);
            let dir = delta / len;
            let stretch = len - params.link_distance;
            let f = params.link_strength * stretch * dir;

            if let Some(fa) = forces.get_mut(&link.source) {
                *fa += f;
            }
            if let Some(fb) = forces.get_mut(&link.target) {
                *fb -= f;
            }
        }

        // Centering pull toward the simulation origin.
        for (id, _) in ids.iter() {
            let pos = *self.positions.get(id).unwrap_or(&Vec2::ZERO);
            *forces.get_mut(id).unwrap() -= pos * params.center_strength;
        }

        for (id, _) in ids.iter() {
            if self.pinned.contains_key(id) {
                continue;
            }
            let f = *forces.get(id).unwrap_or(&Vec2::ZERO);
            let v = self.velocities.entry(id.clone()).or_insert(Vec2::ZERO);
            *v = (*v + f * self.alpha) * params.damping;

            let mut step = *v;
            if step.length() > params.max_step {
                step = step.normalize_or_zero() * params.max_step;
            }

            let p = self.positions.entry(id.clone()).or_insert(Vec2::ZERO);
            *p += step;
        }
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, id: &NodeId, at: Vec2) {
        self.positions.insert(id.clone(), at);
        self.velocities.insert(id.clone(), Vec2::ZERO);
    }

    #[cfg(test)]
    pub(crate) fn is_pinned(&self, id: &NodeId) -> bool {
        self.pinned.contains_key(id)
    }
}

/// Deterministic first placement: a ring radius per kind, angle and jitter
/// from the id's stable hash. Keeps unlinked nodes off the origin and makes
/// seeding reproducible across runs.
fn seed_position(id: &NodeId, kind: NodeKind) -> Vec2 {
    let h = stable_u32(&id.0);
    let ring = match kind {
        NodeKind::Conversation => 40.0,
        NodeKind::User | NodeKind::Agent => 120.0,
        NodeKind::Entity => 160.0,
        NodeKind::Other => 180.0,
        NodeKind::Message => 220.0,
    };
    let angle = (h & 0xFFF) as f32 / 4096.0 * std::f32::consts::TAU;
    let r = ring + ((h >> 12) & 0x3F) as f32;
    Vec2::new(r * angle.cos(), r * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use talkgraph_core::{GraphPayload, WireLink, WireNode};

    fn snapshot(nodes: &[(&str, NodeKind)], links: &[(&str, &str)]) -> GraphPayload {
        GraphPayload {
            nodes: nodes
                .iter()
                .map(|(id, kind)| WireNode {
                    id: NodeId::new(*id),
                    label: id.to_string(),
                    kind: *kind,
                    content: None,
                })
                .collect(),
            links: links
                .iter()
                .map(|(s, t)| WireLink {
                    source: NodeId::new(*s),
                    target: NodeId::new(*t),
                    kind: "reply".into(),
                })
                .collect(),
        }
    }

    #[test]
    fn one_tick_yields_finite_distinct_positions() {
        let mut store = GraphStore::default();
        store.replace(snapshot(
            &[("a", NodeKind::User), ("b", NodeKind::Agent)],
            &[("a", "b")],
        ));

        let mut layout = LayoutState::default();
        layout.sync(&store);
        layout.step(&store, &LayoutParams::default());

        let pa = layout.position(&NodeId::new("a")).unwrap();
        let pb = layout.position(&NodeId::new("b")).unwrap();
        assert!(pa.is_finite() && pb.is_finite());
        assert!(pa.distance(pb) > 0.0);
    }

    #[test]
    fn coincident_nodes_separate() {
        let mut store = GraphStore::default();
        store.replace(snapshot(
            &[("a", NodeKind::Message), ("b", NodeKind::Message)],
            &[],
        ));

        let mut layout = LayoutState::default();
        layout.sync(&store);
        layout.place(&NodeId::new("a"), Vec2::ZERO);
        layout.place(&NodeId::new("b"), Vec2::ZERO);
        layout.step(&store, &LayoutParams::default());

        let pa = layout.position(&NodeId::new("a")).unwrap();
        let pb = layout.position(&NodeId::new("b")).unwrap();
        assert!(pa.is_finite() && pb.is_finite());
        assert!(pa.distance(pb) > 0.0);
    }

    #[test]
    fn pinned_node_holds_position_until_unpinned() {
        let mut store = GraphStore::default();
        store.replace(snapshot(
            &[("a", NodeKind::User), ("b", NodeKind::Agent)],
            &[("a", "b")],
        ));

        let mut layout = LayoutState::default();
        let params = LayoutParams::default();
        layout.sync(&store);

        let anchor = Vec2::new(321.0, -40.0);
        layout.pin(&NodeId::new("a"), anchor);
        for _ in 0..5 {
            layout.step(&store, &params);
        }
        assert_eq!(layout.position(&NodeId::new("a")).unwrap(), anchor);

        layout.unpin(&NodeId::new("a"));
        // Free movement resumes from the pinned spot, no teleport.
        assert_eq!(layout.position(&NodeId::new("a")).unwrap(), anchor);
        layout.reheat();
        layout.step(&store, &params);
        let after = layout.position(&NodeId::new("a")).unwrap();
        assert!(after.is_finite());
        assert!(after.distance(anchor) < params.max_step + 0.001);
    }

    #[test]
    fn replace_keeps_surviving_ids_and_reseeds_new_ones() {
        let mut store = GraphStore::default();
        store.replace(snapshot(
            &[("a", NodeKind::User), ("b", NodeKind::Agent)],
            &[],
        ));

        let mut layout = LayoutState::default();
        layout.sync(&store);
        let held = Vec2::new(77.0, 13.0);
        layout.place(&NodeId::new("a"), held);

        store.replace(snapshot(
            &[("a", NodeKind::User), ("c", NodeKind::Message)],
            &[],
        ));
        layout.sync(&store);

        assert_eq!(layout.position(&NodeId::new("a")).unwrap(), held);
        assert!(layout.position(&NodeId::new("b")).is_none());
        assert!(layout.position(&NodeId::new("c")).is_some());
    }

    #[test]
    fn simulation_settles_and_stops_ticking() {
        let mut store = GraphStore::default();
        store.replace(snapshot(
            &[("a", NodeKind::User), ("b", NodeKind::Agent)],
            &[("a", "b")],
        ));

        let mut layout = LayoutState::default();
        let params = LayoutParams::default();
        layout.sync(&store);
        for _ in 0..400 {
            layout.step(&store, &params);
        }
        assert!(layout.settled(&params));

        let frozen = layout.position(&NodeId::new("a")).unwrap();
        layout.step(&store, &params);
        assert_eq!(layout.position(&NodeId::new("a")).unwrap(), frozen);
    }

    #[test]
    fn drag_alpha_target_keeps_simulation_running() {
        let mut layout = LayoutState::default();
        let params = LayoutParams::default();
        layout.set_alpha_target(DRAG_ALPHA_TARGET);

        let mut store = GraphStore::default();
        store.replace(snapshot(&[("a", NodeKind::User)], &[]));
        layout.sync(&store);
        for _ in 0..1000 {
            layout.step(&store, &params);
        }
        assert!(!layout.settled(&params));

        layout.set_alpha_target(0.0);
        for _ in 0..1000 {
            layout.step(&store, &params);
        }
        assert!(layout.settled(&params));
    }
}
