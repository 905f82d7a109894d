pub mod style;

use bevy::prelude::*;
use bevy::sprite::{ColorMesh2dBundle, Mesh2dHandle};
use bevy_egui::{egui, EguiContexts};
use std::collections::HashMap;
use talkgraph_core::{NodeId, NodeKind};

use crate::app::resources::UiPrefs;
use crate::graph::{GraphStore, LayoutState, SelectionSet};
use crate::interact::controller::InteractionController;
use crate::interact::view::ViewTransform;
use style::{display_label, link_color, node_color, node_radius};

const Z_NODES: f32 = 0.0;
const Z_LABELS: f32 = 1.0;
const LABEL_FONT_SIZE: f32 = 12.0;

#[derive(Component)]
pub struct NodeMarker {
    pub id: NodeId,
    pub kind: NodeKind,
}

/// One circle mesh per kind (radius differs) and one material per
/// (kind, selected) pair, built once at startup.
#[derive(Resource)]
pub struct NodeAssets {
    meshes: HashMap<NodeKind, Mesh2dHandle>,
    materials: HashMap<(NodeKind, bool), Handle<ColorMaterial>>,
}

impl NodeAssets {
    fn mesh(&self, kind: NodeKind) -> Mesh2dHandle {
        self.meshes
            .get(&kind)
            .or_else(|| self.meshes.get(&NodeKind::Other))
            .cloned()
            .unwrap_or_default()
    }

    fn material(&self, kind: NodeKind, selected: bool) -> Handle<ColorMaterial> {
        self.materials
            .get(&(kind, selected))
            .or_else(|| self.materials.get(&(NodeKind::Other, selected)))
            .cloned()
            .unwrap_or_default()
    }
}

pub fn setup_scene(
    mut commands: Commands,
    windows: Query<&Window>,
    mut view: ResMut<ViewTransform>,
) {
    commands.spawn(Camera2dBundle::default());

    // Default translate centers the simulation origin in the window.
    if let Ok(window) = windows.get_single() {
        view.translate = Vec2::new(window.width() * 0.5, window.height() * 0.5);
    }
}

pub fn setup_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let mut mesh_by_kind = HashMap::new();
    let mut material_by_state = HashMap::new();
    for kind in NodeKind::ALL {
        mesh_by_kind.insert(kind, Mesh2dHandle(meshes.add(Circle::new(node_radius(kind)))));
        for selected in [false, true] {
            material_by_state.insert(
                (kind, selected),
                materials.add(ColorMaterial::from(node_color(kind, selected))),
            );
        }
    }
    commands.insert_resource(NodeAssets {
        meshes: mesh_by_kind,
        materials: material_by_state,
    });
}

/// Keeps the bevy camera equal to the controller-owned ViewTransform, so
/// world rendering and the controller's screen math agree exactly:
/// screen = sim * scale + translate, y flipped.
pub fn sync_camera(
    view: Res<ViewTransform>,
    windows: Query<&Window>,
    mut cam: Query<(&mut Transform, &mut OrthographicProjection), With<Camera>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((mut tf, mut proj)) = cam.get_single_mut() else {
        return;
    };
    proj.scale = 1.0 / view.scale;
    tf.translation.x = (window.width() * 0.5 - view.translate.x) / view.scale;
    tf.translation.y = (view.translate.y - window.height() * 0.5) / view.scale;
}

/// Rebuilds node entities when the snapshot (or the label toggle) changes.
/// Per-frame position/color updates happen in `update_node_visuals`.
pub fn rebuild_scene(
    mut commands: Commands,
    store: Res<GraphStore>,
    prefs: Res<UiPrefs>,
    assets: Res<NodeAssets>,
    existing: Query<Entity, With<NodeMarker>>,
    mut last_built: Local<Option<(u64, bool)>>,
) {
    let key = (store.revision(), prefs.show_labels);
    if *last_built == Some(key) {
        return;
    }
    *last_built = Some(key);

    for entity in existing.iter() {
        commands.entity(entity).despawn_recursive();
    }

    for node in store.nodes() {
        let mut spawned = commands.spawn((
            ColorMesh2dBundle {
                mesh: assets.mesh(node.kind),
                material: assets.material(node.kind, false),
                transform: Transform::from_xyz(0.0, 0.0, Z_NODES),
                ..default()
            },
            NodeMarker {
                id: node.id.clone(),
                kind: node.kind,
            },
        ));
        if prefs.show_labels {
            let text = display_label(&node.label).to_string();
            spawned.with_children(|parent| {
                parent.spawn(Text2dBundle {
                    text: Text::from_section(
                        text,
                        TextStyle {
                            font_size: LABEL_FONT_SIZE,
                            color: Color::WHITE,
                            ..default()
                        },
                    )
                    .with_justify(JustifyText::Center),
                    transform: Transform::from_xyz(0.0, 0.0, Z_LABELS),
                    ..default()
                });
            });
        }
    }
}

pub fn update_node_visuals(
    layout: Res<LayoutState>,
    selection: Res<SelectionSet>,
    assets: Res<NodeAssets>,
    mut nodes: Query<(&NodeMarker, &mut Transform, &mut Handle<ColorMaterial>)>,
) {
    for (marker, mut tf, mut material) in nodes.iter_mut() {
        if let Some(pos) = layout.position(&marker.id) {
            tf.translation.x = pos.x;
            tf.translation.y = pos.y;
        }
        let want = assets.material(marker.kind, selection.is_selected(&marker.id));
        if *material != want {
            *material = want;
        }
    }
}

pub fn draw_links(
    store: Res<GraphStore>,
    layout: Res<LayoutState>,
    prefs: Res<UiPrefs>,
    mut gizmos: Gizmos,
) {
    if !prefs.show_links {
        return;
    }
    for link in store.links() {
        // Dangling endpoints are dropped silently.
        let (Some(a), Some(b)) = (layout.position(&link.source), layout.position(&link.target))
        else {
            continue;
        };
        gizmos.line_2d(a, b, link_color());
    }
}

/// Translucent overlay above everything else while a marquee drag is live.
pub fn draw_marquee(ctl: Res<InteractionController>, mut contexts: EguiContexts) {
    let Some((min, max)) = ctl.marquee_rect() else {
        return;
    };
    let ctx = contexts.ctx_mut();
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("marquee"),
    ));
    let rect = egui::Rect::from_min_max(egui::pos2(min.x, min.y), egui::pos2(max.x, max.y));
    painter.rect_filled(
        rect,
        egui::Rounding::ZERO,
        egui::Color32::from_rgba_unmultiplied(110, 150, 255, 36),
    );
    painter.rect_stroke(
        rect,
        egui::Rounding::ZERO,
        egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(150, 180, 255, 160)),
    );
}
