use crate::area::AreaModel;
use crate::player::PlayerModel;
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Outbound town event, fanned out to every subscriber of the town
///
/// Area and town mutations return these instead of emitting them, so the
/// caller decides when (and over what transport) they are published. The
/// order of a returned batch is the order subscribers must observe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum TownEvent {
    PlayerJoined(PlayerModel),
    PlayerMoved(PlayerModel),
    PlayerDisconnect(PlayerModel),
    InteractableUpdate(AreaModel),
}

impl TownEvent {
    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            TownEvent::PlayerJoined(_) => "playerJoined",
            TownEvent::PlayerMoved(_) => "playerMoved",
            TownEvent::PlayerDisconnect(_) => "playerDisconnect",
            TownEvent::InteractableUpdate(_) => "interactableUpdate",
        }
    }
}
