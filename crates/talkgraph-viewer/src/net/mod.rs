pub mod protocol;
pub mod ws;

pub use protocol::Incoming;
pub use ws::{spawn, NetHandle, RECONNECT_DELAY};
