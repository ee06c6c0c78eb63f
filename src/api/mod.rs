// HTTP and WebSocket APIs

pub mod town;
pub mod websocket;

pub use town::{create_town_router, TownAppState};
pub use websocket::{create_ws_router, ws_handler, WsAppState};
