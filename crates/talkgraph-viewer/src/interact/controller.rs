use bevy::prelude::{Resource, Vec2};
use talkgraph_core::NodeId;

use crate::audio::Cue;
use crate::graph::layout::{LayoutState, DRAG_ALPHA_TARGET};
use crate::graph::selection::SelectionSet;
use crate::graph::store::GraphStore;
use crate::interact::view::ViewTransform;
use crate::render::style::node_radius;

/// Movement past this distance turns a press into a drag; anything shorter
/// is a click.
pub const DRAG_THRESHOLD_PX: f32 = 5.0;
pub const DOUBLE_CLICK_SECS: f64 = 0.35;
pub const DOUBLE_CLICK_SLOP_PX: f32 = 24.0;
const PICK_SLOP_PX: f32 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Idle,
    /// Pressed on a node, not yet past the drag threshold.
    ArmedNode { id: NodeId, press: Vec2 },
    /// Dragging a node; `grab` is the node-center offset captured at
    /// promotion so the node does not jump to the cursor.
    NodeDrag { id: NodeId, grab: Vec2 },
    /// Pressed on empty canvas, not yet past the threshold.
    ArmedSelect { press: Vec2 },
    Marquee { origin: Vec2, current: Vec2 },
    Pan { last: Vec2 },
}

/// Pointer state machine over pan, zoom, node drag, click-select and
/// marquee-select. Pan and marquee are mutually exclusive per gesture,
/// decided at pointer-down by modifier state. Host-independent: the input
/// system feeds it screen positions and timestamps.
#[derive(Resource)]
pub struct InteractionController {
    gesture: Gesture,
    last_empty_click: Option<(Vec2, f64)>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self {
            gesture: Gesture::Idle,
            last_empty_click: None,
        }
    }
}

impl InteractionController {
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Screen-space marquee rectangle while one is being dragged.
    pub fn marquee_rect(&self) -> Option<(Vec2, Vec2)> {
        match &self.gesture {
            Gesture::Marquee { origin, current } => {
                Some((origin.min(*current), origin.max(*current)))
            }
            _ => None,
        }
    }

    pub fn pointer_down(
        &mut self,
        screen: Vec2,
        modifier: bool,
        store: &GraphStore,
        layout: &LayoutState,
        view: &ViewTransform,
    ) {
        if !matches!(self.gesture, Gesture::Idle) {
            return;
        }
        if modifier {
            self.gesture = Gesture::Pan { last: screen };
        } else if let Some(id) = pick_node(store, layout, view, screen) {
            self.gesture = Gesture::ArmedNode { id, press: screen };
        } else {
            self.gesture = Gesture::ArmedSelect { press: screen };
        }
    }

    pub fn pointer_move(
        &mut self,
        screen: Vec2,
        store: &GraphStore,
        layout: &mut LayoutState,
        view: &mut ViewTransform,
        cues: &mut Vec<Cue>,
    ) {
        match self.gesture.clone() {
            Gesture::Idle => {}
            Gesture::Pan { last } => {
                view.pan_by(screen - last);
                self.gesture = Gesture::Pan { last: screen };
            }
            Gesture::ArmedNode { id, press } => {
                if (screen - press).length() < DRAG_THRESHOLD_PX {
                    return;
                }
                // The armed node may have vanished with a snapshot replace.
                let Some(pos) = (store.contains(&id)).then(|| layout.position(&id)).flatten()
                else {
                    self.gesture = Gesture::Idle;
                    return;
                };
                let grab = pos - view.screen_to_sim(press);
                layout.pin(&id, view.screen_to_sim(screen) + grab);
                layout.set_alpha_target(DRAG_ALPHA_TARGET);
                self.gesture = Gesture::NodeDrag { id, grab };
            }
            Gesture::NodeDrag { id, grab } => {
                if !store.contains(&id) {
                    // Snapshot replaced mid-drag: the gesture ends silently.
                    layout.unpin(&id);
                    layout.set_alpha_target(0.0);
                    self.gesture = Gesture::Idle;
                    return;
                }
                layout.pin(&id, view.screen_to_sim(screen) + grab);
            }
            Gesture::ArmedSelect { press } => {
                if (screen - press).length() >= DRAG_THRESHOLD_PX {
                    cues.push(Cue::MarqueeStart);
                    self.gesture = Gesture::Marquee {
                        origin: press,
                        current: screen,
                    };
                }
            }
            Gesture::Marquee { origin, .. } => {
                self.gesture = Gesture::Marquee {
                    origin,
                    current: screen,
                };
            }
        }
    }

    pub fn pointer_up(
        &mut self,
        screen: Vec2,
        now: f64,
        store: &GraphStore,
        layout: &mut LayoutState,
        view: &ViewTransform,
        selection: &mut SelectionSet,
        cues: &mut Vec<Cue>,
    ) {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle | Gesture::Pan { .. } => {}
            Gesture::ArmedNode { id, .. } => {
                if let Some(node) = store.get(&id) {
                    selection.toggle(node.id.clone(), node.label.clone());
                    cues.push(Cue::NodeClick);
                }
                self.last_empty_click = None;
            }
            Gesture::NodeDrag { id, .. } => {
                // Pins never outlive the gesture.
                layout.unpin(&id);
                layout.set_alpha_target(0.0);
            }
            Gesture::ArmedSelect { .. } => {
                if let Some((at, t)) = self.last_empty_click.take() {
                    if now - t <= DOUBLE_CLICK_SECS
                        && (screen - at).length() <= DOUBLE_CLICK_SLOP_PX
                    {
                        selection.clear();
                        return;
                    }
                }
                self.last_empty_click = Some((screen, now));
            }
            Gesture::Marquee { origin, current } => {
                commit_marquee(origin, current, store, layout, view, selection);
                cues.push(Cue::MarqueeCommit);
                self.last_empty_click = None;
            }
        }
    }

    /// Ends whatever gesture is in flight without committing anything, e.g.
    /// when the pointer leaves the window mid-gesture.
    pub fn abort(&mut self, layout: &mut LayoutState) {
        if let Gesture::NodeDrag { id, .. } = &self.gesture {
            layout.unpin(id);
            layout.set_alpha_target(0.0);
        }
        self.gesture = Gesture::Idle;
    }
}

/// Nearest node whose screen-projected circle contains the cursor.
pub fn pick_node(
    store: &GraphStore,
    layout: &LayoutState,
    view: &ViewTransform,
    cursor: Vec2,
) -> Option<NodeId> {
    let mut best: Option<(f32, NodeId)> = None;
    for node in store.nodes() {
        let Some(pos) = layout.position(&node.id) else {
            continue;
        };
        let d = view.sim_to_screen(pos).distance(cursor);
        let reach = node_radius(node.kind) * view.scale + PICK_SLOP_PX;
        if d <= reach && best.as_ref().map(|(bd, _)| d < *bd).unwrap_or(true) {
            best = Some((d, node.id.clone()));
        }
    }
    best.map(|(_, id)| id)
}

/// Toggles every node whose transformed bounding circle intersects the
/// marquee rectangle; already-selected nodes that are re-covered come back
/// out of the selection.
fn commit_marquee(
    a: Vec2,
    b: Vec2,
    store: &GraphStore,
    layout: &LayoutState,
    view: &ViewTransform,
    selection: &mut SelectionSet,
) {
    let min = a.min(b);
    let max = a.max(b);
    for node in store.nodes() {
        let Some(pos) = layout.position(&node.id) else {
            continue;
        };
        let center = view.sim_to_screen(pos);
        let r = node_radius(node.kind) * view.scale;
        if circle_intersects_rect(center, r, min, max) {
            selection.toggle(node.id.clone(), node.label.clone());
        }
    }
}

fn circle_intersects_rect(center: Vec2, r: f32, min: Vec2, max: Vec2) -> bool {
    let nearest = center.clamp(min, max);
    nearest.distance_squared(center) <= r * r
}
