use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(test)]
mod tests;

pub type PlayerId = String;

/// Facing direction of a player sprite
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Front,
    Back,
    Left,
    Right,
}

/// Where a player is and which area (if any) currently owns them
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerLocation {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub rotation: Direction,
    #[serde(default)]
    pub moving: bool,
    /// Owning area. Clients may send a value but the town overwrites it.
    #[serde(
        rename = "interactableID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub interactable_id: Option<String>,
}

/// A connected participant
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub user_name: String,
    pub location: PlayerLocation,
}

/// Player record sent over the wire (`playerMoved`, `playerJoined`, ...)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerModel {
    pub id: PlayerId,
    pub user_name: String,
    pub location: PlayerLocation,
}

impl Player {
    /// Create a player with a fresh UUID v4 id at the origin
    pub fn new(user_name: &str) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), user_name)
    }

    pub fn with_id(id: impl Into<PlayerId>, user_name: &str) -> Self {
        Self {
            id: id.into(),
            user_name: user_name.to_string(),
            location: PlayerLocation::default(),
        }
    }

    pub fn interactable_id(&self) -> Option<&str> {
        self.location.interactable_id.as_deref()
    }

    pub fn to_model(&self) -> PlayerModel {
        PlayerModel {
            id: self.id.clone(),
            user_name: self.user_name.clone(),
            location: self.location.clone(),
        }
    }
}
