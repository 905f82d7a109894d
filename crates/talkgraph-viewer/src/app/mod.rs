use bevy::prelude::*;
use std::sync::{Arc, Mutex};

use crate::audio::Cue;
use crate::graph::{self, GraphStore, LayoutParams, LayoutState, SelectionSet};
use crate::interact::{self, InteractionController, ViewTransform};
use crate::net::{self, Incoming};
use crate::render;
use crate::ui;
use crate::util::config::{self, ViewerConfig};

pub mod resources;

use resources::{ChatForward, ChatInbox, NetLink, NetRx, NetStatus, NetTx, SharedView, UiPrefs};

const CHAT_FORWARD_CAPACITY: usize = 256;

pub struct TalkgraphViewerPlugin;

impl Plugin for TalkgraphViewerPlugin {
    fn build(&self, app: &mut App) {
        let cfg = config::load_or_default();

        let (inbound_tx, inbound_rx) = crossbeam_channel::unbounded();
        let (outbound_tx, outbound_rx) = tokio::sync::mpsc::unbounded_channel();
        let (chat_tx, chat_rx) = crossbeam_channel::bounded(CHAT_FORWARD_CAPACITY);
        let shared_view = Arc::new(Mutex::new(cfg.graph));
        let handle = net::spawn(
            cfg.endpoint.clone(),
            Arc::clone(&shared_view),
            inbound_tx,
            outbound_rx,
        );

        let params = LayoutParams {
            link_distance: cfg.link_distance,
            charge_strength: cfg.repulsion,
            collision_enabled: cfg.collision_enabled,
            ..LayoutParams::default()
        };
        let prefs = UiPrefs {
            view: cfg.graph,
            panel_width: cfg.panel_width,
            show_links: cfg.show_links,
            show_labels: cfg.show_labels,
        };

        app.insert_resource(NetRx(inbound_rx))
            .insert_resource(NetTx(outbound_tx))
            .insert_resource(SharedView(shared_view))
            .insert_resource(NetLink(handle))
            .insert_resource(ChatForward(chat_tx))
            .insert_resource(ChatInbox(chat_rx))
            .insert_resource(NetStatus::default())
            .insert_resource(GraphStore::default())
            .insert_resource(SelectionSet::default())
            .insert_resource(LayoutState::default())
            .insert_resource(params)
            .insert_resource(ViewTransform::default())
            .insert_resource(InteractionController::default())
            .insert_resource(prefs)
            .insert_resource(Persisted { last: cfg })
            .add_event::<Cue>()
            .add_systems(Startup, (render::setup_scene, render::setup_assets))
            .add_systems(
                Update,
                (
                    pump_network,
                    ui::handle_shortcuts,
                    ui::ui_panel,
                    interact::pointer_input,
                    graph::advance_layout,
                    render::sync_camera,
                    render::rebuild_scene,
                    render::update_node_visuals,
                    render::draw_links,
                    render::draw_marquee,
                    ui::hud_overlay,
                    persist_prefs,
                )
                    .chain(),
            );

        #[cfg(feature = "audio")]
        app.add_systems(Startup, crate::audio::playback::setup)
            .add_systems(Update, crate::audio::playback::play);
    }
}

/// Drains the reader thread's channel once per frame. Each message applies
/// atomically relative to the tick; a snapshot replace mid-gesture is valid
/// because the controller revalidates its node id against the store.
fn pump_network(
    rx: Res<NetRx>,
    chat: Res<ChatForward>,
    mut status: ResMut<NetStatus>,
    mut store: ResMut<GraphStore>,
    mut layout: ResMut<LayoutState>,
) {
    for inc in rx.0.try_iter().take(10_000) {
        match inc {
            Incoming::Connected => *status = NetStatus::Connected,
            Incoming::Disconnected => *status = NetStatus::Reconnecting,
            Incoming::Graph(payload) => {
                store.replace(payload);
                layout.sync(&store);
                layout.reheat();
            }
            Incoming::Chat(payload) => {
                if chat.0.try_send(payload).is_err() {
                    tracing::debug!("chat forward buffer full, dropping frame");
                }
            }
        }
    }
}

#[derive(Resource)]
struct Persisted {
    last: ViewerConfig,
}

/// Writes the config file whenever a persisted preference changed.
fn persist_prefs(
    prefs: Res<UiPrefs>,
    params: Res<LayoutParams>,
    mut persisted: ResMut<Persisted>,
) {
    let current = ViewerConfig {
        endpoint: persisted.last.endpoint.clone(),
        graph: prefs.view,
        panel_width: prefs.panel_width,
        show_links: prefs.show_links,
        show_labels: prefs.show_labels,
        link_distance: params.link_distance,
        repulsion: params.charge_strength,
        collision_enabled: params.collision_enabled,
    };
    if current != persisted.last {
        if let Err(err) = config::save(&current) {
            tracing::warn!(%err, "failed to persist viewer config");
        }
        persisted.last = current;
    }
}
