use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use futures_util::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use talkgraph_core::{ClientMsg, GraphView};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::net::protocol::{decode_frame, Incoming};

/// Fixed delay between reconnect attempts. No backoff, no retry cap.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(2);

const SHUTDOWN_POLL: Duration = Duration::from_millis(250);

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Owns the reader thread's shutdown flag. Dropping the handle (viewer
/// teardown) closes the socket and stops the reconnect loop, so no timer or
/// callback outlives the app.
pub struct NetHandle {
    shutdown: Arc<AtomicBool>,
}

impl NetHandle {
    pub fn close(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

impl Drop for NetHandle {
    fn drop(&mut self) {
        self.close();
    }
}

/// Spawns the synchronization channel: one logical connection to the graph
/// server, maintained forever on a dedicated thread with its own runtime.
/// `view` is read at every (re)connect so the server resumes pushing the
/// right graph; `outbound` carries view switches made from the UI.
pub fn spawn(
    endpoint: String,
    view: Arc<Mutex<GraphView>>,
    tx: Sender<Incoming>,
    mut outbound: UnboundedReceiver<ClientMsg>,
) -> NetHandle {
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);

    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
        rt.block_on(async move {
            while !flag.load(Ordering::Relaxed) {
                match connect_async(endpoint.as_str()).await {
                    Ok((ws, _)) => {
                        let _ = tx.send(Incoming::Connected);
                        if let Err(err) = serve(ws, &view, &tx, &mut outbound, &flag).await {
                            tracing::debug!(%err, "connection lost");
                        }
                        let _ = tx.send(Incoming::Disconnected);
                    }
                    Err(err) => {
                        tracing::debug!(%err, endpoint = %endpoint, "connect failed");
                        let _ = tx.send(Incoming::Disconnected);
                    }
                }
                if flag.load(Ordering::Relaxed) {
                    break;
                }
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        });
    });

    NetHandle { shutdown }
}

async fn serve(
    mut ws: WsStream,
    view: &Arc<Mutex<GraphView>>,
    tx: &Sender<Incoming>,
    outbound: &mut UnboundedReceiver<ClientMsg>,
    flag: &Arc<AtomicBool>,
) -> Result<()> {
    // Resend the active view request so the server resumes the right graph.
    let graph = *view.lock().expect("view lock");
    send_msg(&mut ws, &ClientMsg::GetGraphData { graph }).await?;

    let mut poll = tokio::time::interval(SHUTDOWN_POLL);

    loop {
        tokio::select! {
            frame = ws.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if let Some(inc) = decode_frame(text.as_str()) {
                        let _ = tx.send(inc);
                    }
                }
                Some(Ok(Message::Close(_))) | None => return Ok(()),
                Some(Ok(_)) => {} // binary / ping / pong: not part of the protocol
                Some(Err(err)) => return Err(err.into()),
            },
            msg = outbound.recv() => match msg {
                Some(msg) => send_msg(&mut ws, &msg).await?,
                // Sender dropped: the viewer is tearing down.
                None => {
                    let _ = ws.close(None).await;
                    return Ok(());
                }
            },
            _ = poll.tick() => {
                if flag.load(Ordering::Relaxed) {
                    let _ = ws.close(None).await;
                    return Ok(());
                }
            }
        }
    }
}

async fn send_msg(ws: &mut WsStream, msg: &ClientMsg) -> Result<()> {
    let payload = serde_json::to_string(msg).context("encode client message")?;
    ws.send(Message::text(payload)).await?;
    Ok(())
}
