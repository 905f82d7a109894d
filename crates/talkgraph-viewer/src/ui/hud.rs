use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::app::resources::{ChatInbox, NetStatus};
use crate::graph::{GraphStore, LayoutParams, LayoutState, SelectionSet};
use crate::interact::controller::{Gesture, InteractionController};

#[allow(clippy::too_many_arguments)]
pub fn hud_overlay(
    mut contexts: EguiContexts,
    time: Res<Time>,
    status: Res<NetStatus>,
    store: Res<GraphStore>,
    selection: Res<SelectionSet>,
    layout: Res<LayoutState>,
    params: Res<LayoutParams>,
    ctl: Res<InteractionController>,
    chat: Res<ChatInbox>,
) {
    let fps = 1.0 / time.delta_seconds().max(0.0001);
    let ctx = contexts.ctx_mut();
    egui::Area::new("hud".into())
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-8.0, 8.0))
        .show(ctx, |ui| {
            ui.group(|ui| {
                ui.label(format!("FPS: {fps:.0}"));
                ui.label(format!(
                    "{} nodes / {} links",
                    store.node_count(),
                    store.link_count()
                ));
                ui.label(format!("selected: {}", selection.len()));
                if layout.settled(&params) {
                    ui.label("layout: settled");
                } else {
                    ui.label(format!("layout: alpha {:.3}", layout.alpha()));
                }
                match ctl.gesture() {
                    Gesture::NodeDrag { .. } => {
                        ui.label("dragging node");
                    }
                    Gesture::Marquee { .. } => {
                        ui.label("marquee select");
                    }
                    Gesture::Pan { .. } => {
                        ui.label("panning");
                    }
                    _ => {}
                }
                if !chat.0.is_empty() {
                    ui.label(format!("chat frames buffered: {}", chat.0.len()));
                }
                if *status == NetStatus::Reconnecting {
                    ui.colored_label(
                        egui::Color32::from_rgb(240, 160, 60),
                        "disconnected — reconnecting…",
                    );
                }
            });
        });
}
