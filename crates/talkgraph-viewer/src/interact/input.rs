use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::audio::Cue;
use crate::graph::{GraphStore, LayoutState, SelectionSet};
use crate::interact::controller::InteractionController;
use crate::interact::view::ViewTransform;

/// Translates host pointer events into controller calls. Gestures are
/// decided here once per frame, in event-loop order; egui gets first claim
/// on the pointer so panel interaction never leaks into the canvas.
#[allow(clippy::too_many_arguments)]
pub fn pointer_input(
    windows: Query<&Window>,
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut wheel: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
    time: Res<Time>,
    store: Res<GraphStore>,
    mut layout: ResMut<LayoutState>,
    mut view: ResMut<ViewTransform>,
    mut selection: ResMut<SelectionSet>,
    mut ctl: ResMut<InteractionController>,
    mut cues: EventWriter<Cue>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let egui_wants_pointer = contexts.ctx_mut().wants_pointer_input();
    let cursor = window.cursor_position();
    let modifier = keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight);

    let mut fired: Vec<Cue> = Vec::new();

    for ev in wheel.read() {
        if egui_wants_pointer {
            continue;
        }
        let Some(c) = cursor else {
            continue;
        };
        let amount = match ev.unit {
            MouseScrollUnit::Line => ev.y * 0.12,
            MouseScrollUnit::Pixel => ev.y / 600.0,
        };
        view.zoom_about(c, amount.exp());
    }

    if buttons.just_pressed(MouseButton::Left) && !egui_wants_pointer {
        if let Some(c) = cursor {
            ctl.pointer_down(c, modifier, &store, &layout, &view);
        }
    }

    if let Some(c) = cursor {
        ctl.pointer_move(c, &store, &mut layout, &mut view, &mut fired);
    }

    if buttons.just_released(MouseButton::Left) {
        match cursor {
            Some(c) => ctl.pointer_up(
                c,
                time.elapsed_seconds_f64(),
                &store,
                &mut layout,
                &view,
                &mut selection,
                &mut fired,
            ),
            // Released outside the window: end the gesture, commit nothing.
            None => ctl.abort(&mut layout),
        }
    }

    for cue in fired {
        cues.send(cue);
    }
}
