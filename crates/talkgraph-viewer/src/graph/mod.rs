pub mod layout;
pub mod selection;
pub mod store;

use bevy::prelude::{Res, ResMut};

pub use layout::{LayoutParams, LayoutState};
pub use selection::SelectionSet;
pub use store::GraphStore;

/// Advances the simulation once per frame callback.
pub fn advance_layout(
    store: Res<GraphStore>,
    params: Res<LayoutParams>,
    mut layout: ResMut<LayoutState>,
) {
    layout.step(&store, &params);
}
