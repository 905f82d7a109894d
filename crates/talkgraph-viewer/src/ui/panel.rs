use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use std::collections::BTreeMap;
use talkgraph_core::{ClientMsg, GraphView, NodeId};

use crate::app::resources::{NetStatus, NetTx, SharedView, UiPrefs};
use crate::graph::{GraphStore, LayoutParams, LayoutState, SelectionSet};

#[allow(clippy::too_many_arguments)]
pub fn ui_panel(
    mut contexts: EguiContexts,
    status: Res<NetStatus>,
    store: Res<GraphStore>,
    mut prefs: ResMut<UiPrefs>,
    mut params: ResMut<LayoutParams>,
    mut layout: ResMut<LayoutState>,
    mut selection: ResMut<SelectionSet>,
    shared: Res<SharedView>,
    tx: Res<NetTx>,
) {
    let ctx = contexts.ctx_mut();
    let response = egui::SidePanel::left("panel")
        .resizable(true)
        .default_width(prefs.panel_width)
        .show(ctx, |ui| {
            ui.heading("Talkgraph");
            match *status {
                NetStatus::Connected => {
                    ui.colored_label(egui::Color32::from_rgb(120, 220, 120), "connected")
                }
                NetStatus::Connecting => ui.colored_label(egui::Color32::GRAY, "connecting…"),
                NetStatus::Reconnecting => ui.colored_label(
                    egui::Color32::from_rgb(240, 160, 60),
                    "disconnected — reconnecting…",
                ),
            };
            ui.separator();

            ui.label("Graph view:");
            ui.horizontal(|ui| {
                for view in GraphView::ALL {
                    if ui
                        .selectable_label(prefs.view == view, view.as_str())
                        .clicked()
                        && prefs.view != view
                    {
                        prefs.view = view;
                        *shared.0.lock().expect("view lock") = view;
                        let _ = tx.0.send(ClientMsg::GetGraphData { graph: view });
                    }
                }
            });

            ui.add_space(8.0);
            ui.label(format!("nodes: {}", store.node_count()));
            ui.label(format!("links: {}", store.link_count()));
            let mut by_kind: BTreeMap<&str, usize> = BTreeMap::new();
            for link in store.links() {
                *by_kind.entry(link.kind.as_str()).or_insert(0) += 1;
            }
            for (kind, count) in by_kind {
                ui.label(format!("  {kind}: {count}"));
            }

            ui.add_space(8.0);
            ui.separator();
            ui.heading("Layout");
            ui.add(egui::Slider::new(&mut params.link_distance, 10.0..=200.0).text("link dist"));
            ui.add(
                egui::Slider::new(&mut params.charge_strength, 0.0..=80_000.0).text("repulsion"),
            );
            ui.checkbox(&mut params.collision_enabled, "Collision");
            ui.horizontal(|ui| {
                ui.checkbox(&mut prefs.show_links, "Links");
                ui.checkbox(&mut prefs.show_labels, "Labels");
            });
            if ui.button("Reheat").clicked() {
                layout.reheat();
            }

            ui.add_space(8.0);
            ui.separator();
            ui.heading("Selected nodes");
            if selection.is_empty() {
                ui.label("none — click a node or drag a marquee");
            } else {
                // Sorted copy for stable chip order; the set itself makes no
                // ordering guarantee.
                let mut chips: Vec<(NodeId, String)> = selection
                    .iter()
                    .map(|(id, label)| (id.clone(), label.to_string()))
                    .collect();
                chips.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

                let mut deselect: Option<(NodeId, String)> = None;
                ui.horizontal_wrapped(|ui| {
                    for (id, label) in chips {
                        let mut hover = id.0.clone();
                        if let Some(content) =
                            store.get(&id).and_then(|n| n.content.as_deref())
                        {
                            hover.push('\n');
                            hover.push_str(content);
                        }
                        if ui.button(&label).on_hover_text(hover).clicked() {
                            deselect = Some((id, label));
                        }
                    }
                });
                if let Some((id, label)) = deselect {
                    selection.toggle(id, label);
                }
                if ui.button("Clear selection").clicked() {
                    selection.clear();
                }
            }
        });

    let width = response.response.rect.width();
    if (width - prefs.panel_width).abs() > 0.5 {
        prefs.panel_width = width;
    }
}
