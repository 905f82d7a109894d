use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Node category as sent by the server. Unknown strings decode to `Other`
/// so a snapshot never fails on a kind this client predates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    User,
    Agent,
    Message,
    Conversation,
    Entity,
    Other,
}

impl NodeKind {
    pub const ALL: [NodeKind; 6] = [
        Self::User,
        Self::Agent,
        Self::Message,
        Self::Conversation,
        Self::Entity,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Agent => "agent",
            Self::Message => "message",
            Self::Conversation => "conversation",
            Self::Entity => "entity",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "user" => Self::User,
            "agent" => Self::Agent,
            "message" => Self::Message,
            "conversation" => Self::Conversation,
            "entity" => Self::Entity,
            _ => Self::Other,
        }
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WireNode {
    pub id: NodeId,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WireLink {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A complete node/link set. Replaces all prior graph state on arrival;
/// there is no partial-update protocol.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphPayload {
    pub nodes: Vec<WireNode>,
    pub links: Vec<WireLink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GraphView {
    #[default]
    Conversation,
    Entity,
    Knowledge,
}

impl GraphView {
    pub const ALL: [GraphView; 3] = [Self::Conversation, Self::Entity, Self::Knowledge];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conversation => "conversation",
            Self::Entity => "entity",
            Self::Knowledge => "knowledge",
        }
    }
}

/// Chat frames pass through this client untouched; the payload stays loose
/// JSON because the chat sub-application owns its shape. The server sends
/// either a full `messages` history or a single `message`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    GetGraphData { graph: GraphView },
    Chat { content: String, sender_type: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMsg {
    Graph { data: GraphPayload },
    Chat(ChatPayload),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_message_decodes() {
        let raw = r#"{
            "type": "graph",
            "data": {
                "nodes": [
                    {"id": "conv-1", "label": "Conversation: conv-1", "type": "conversation"},
                    {"id": "m-1", "label": "Message: hi there...", "type": "message", "content": "hi there"}
                ],
                "links": [
                    {"source": "conv-1", "target": "m-1", "type": "HAS_MESSAGE"}
                ]
            }
        }"#;

        let msg: ServerMsg = serde_json::from_str(raw).expect("decode graph msg");
        let ServerMsg::Graph { data } = msg else {
            panic!("expected graph variant");
        };
        assert_eq!(data.nodes.len(), 2);
        assert_eq!(data.nodes[0].kind, NodeKind::Conversation);
        assert_eq!(data.nodes[1].content.as_deref(), Some("hi there"));
        assert_eq!(data.links[0].kind, "HAS_MESSAGE");
    }

    #[test]
    fn unknown_node_kind_falls_back() {
        let node: WireNode =
            serde_json::from_str(r#"{"id": "x", "label": "x", "type": "widget"}"#).unwrap();
        assert_eq!(node.kind, NodeKind::Other);
    }

    #[test]
    fn unknown_message_type_is_rejected() {
        let raw = r#"{"type": "telemetry", "data": {}}"#;
        assert!(serde_json::from_str::<ServerMsg>(raw).is_err());
    }

    #[test]
    fn chat_message_single_and_history_shapes() {
        let single: ServerMsg =
            serde_json::from_str(r#"{"type": "chat", "message": {"content": "ok"}}"#).unwrap();
        let ServerMsg::Chat(p) = single else {
            panic!("expected chat variant");
        };
        assert!(p.message.is_some() && p.messages.is_none());

        let history: ServerMsg =
            serde_json::from_str(r#"{"type": "chat", "messages": []}"#).unwrap();
        let ServerMsg::Chat(p) = history else {
            panic!("expected chat variant");
        };
        assert_eq!(p.messages.unwrap().len(), 0);
    }

    #[test]
    fn view_request_wire_shape() {
        let msg = ClientMsg::GetGraphData {
            graph: GraphView::Conversation,
        };
        assert_eq!(
            serde_json::to_string(&msg).unwrap(),
            r#"{"type":"get_graph_data","graph":"conversation"}"#
        );
    }
}
