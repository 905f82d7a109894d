mod app;
mod audio;
mod graph;
mod interact;
mod net;
mod render;
mod ui;
mod util;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

fn main() {
    init_tracing();

    App::new()
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Talkgraph".into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin)
        .add_plugins(app::TalkgraphViewerPlugin)
        .run();
}
