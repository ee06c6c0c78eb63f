// WebSocket subscription management

pub mod manager;
pub mod protocol;

pub use manager::{ConnectionManager, JoinGate};
pub use protocol::{ClientMessage, InitializePayload, ServerMessage};
