use bevy::prelude::Resource;
use crossbeam_channel::Receiver;
use std::sync::{Arc, Mutex};
use talkgraph_core::{ChatPayload, ClientMsg, GraphView};
use tokio::sync::mpsc::UnboundedSender;

use crate::net::{Incoming, NetHandle};

#[derive(Resource)]
pub struct NetRx(pub Receiver<Incoming>);

#[derive(Resource)]
pub struct NetTx(pub UnboundedSender<ClientMsg>);

/// The view the reader thread re-requests on every (re)connect.
#[derive(Resource)]
pub struct SharedView(pub Arc<Mutex<GraphView>>);

/// Held so the reader thread's shutdown flag trips when the app tears down.
#[derive(Resource)]
pub struct NetLink(#[allow(dead_code)] pub NetHandle);

/// Producer side of the chat hand-off; graph code never reads chat frames.
#[derive(Resource)]
pub struct ChatForward(pub crossbeam_channel::Sender<ChatPayload>);

/// Intake of the (external) chat sub-application. Bounded; overflow drops.
#[derive(Resource)]
pub struct ChatInbox(pub Receiver<ChatPayload>);

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetStatus {
    #[default]
    Connecting,
    Connected,
    Reconnecting,
}

/// Runtime UI preferences; the persisted subset is written back to the
/// config file whenever it changes.
#[derive(Resource)]
pub struct UiPrefs {
    pub view: GraphView,
    pub panel_width: f32,
    pub show_links: bool,
    pub show_labels: bool,
}
