use talkgraph_core::{ChatPayload, GraphPayload, ServerMsg};

/// What the reader thread hands to the UI loop, one value per event.
#[derive(Debug, Clone)]
pub enum Incoming {
    Connected,
    Disconnected,
    Graph(GraphPayload),
    Chat(ChatPayload),
}

/// Decodes one inbound text frame. Malformed or unrecognized frames are
/// logged and dropped; the channel never dies on bad input.
pub fn decode_frame(text: &str) -> Option<Incoming> {
    match serde_json::from_str::<ServerMsg>(text) {
        Ok(ServerMsg::Graph { data }) => Some(Incoming::Graph(data)),
        Ok(ServerMsg::Chat(payload)) => Some(Incoming::Chat(payload)),
        Err(err) => {
            tracing::debug!(%err, "dropping unrecognized frame");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_frame_decodes_to_incoming_graph() {
        let raw = r#"{"type":"graph","data":{"nodes":[{"id":"a","label":"User: a","type":"user"}],"links":[]}}"#;
        let Some(Incoming::Graph(data)) = decode_frame(raw) else {
            panic!("expected graph");
        };
        assert_eq!(data.nodes.len(), 1);
    }

    #[test]
    fn chat_frame_decodes_to_incoming_chat() {
        let raw = r#"{"type":"chat","message":{"content":"hello"}}"#;
        assert!(matches!(decode_frame(raw), Some(Incoming::Chat(_))));
    }

    #[test]
    fn malformed_and_unknown_frames_are_dropped() {
        assert!(decode_frame("not json at all").is_none());
        assert!(decode_frame(r#"{"type":"presence","who":"x"}"#).is_none());
        assert!(decode_frame(r#"{"type":"graph"}"#).is_none());
    }
}
