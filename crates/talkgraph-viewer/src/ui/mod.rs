pub mod hud;
pub mod panel;

use bevy::prelude::ResMut;
use bevy_egui::{egui, EguiContexts};

use crate::graph::SelectionSet;

pub use hud::hud_overlay;
pub use panel::ui_panel;

pub fn handle_shortcuts(mut contexts: EguiContexts, mut selection: ResMut<SelectionSet>) {
    let ctx = contexts.ctx_mut();
    if ctx.wants_keyboard_input() {
        return;
    }
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && !selection.is_empty() {
        selection.clear();
    }
}
