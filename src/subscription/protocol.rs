use crate::area::{AreaModel, AreaPrompt};
use crate::event::TownEvent;
use crate::player::{PlayerId, PlayerLocation};
use crate::town::TownSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client → Server message types
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "playerMovement")]
    PlayerMovement { location: PlayerLocation },
    #[serde(rename = "interactableUpdate")]
    InteractableUpdate { model: AreaModel },
}

/// Server → Client envelope
///
/// `type` is the event name (`playerMoved`, `interactableUpdate`, ...)
/// and `payload` its body.
#[derive(Debug, Clone, Serialize)]
pub struct ServerMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub timestamp: DateTime<Utc>,
    pub payload: Value,
}

/// Payload of the `initialize` message
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializePayload {
    pub player_id: PlayerId,
    #[serde(flatten)]
    pub town: TownSnapshot,
}

impl ServerMessage {
    fn new(msg_type: &str, payload: Value) -> Self {
        Self {
            msg_type: msg_type.to_string(),
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Wrap a broadcast town event
    pub fn event(event: &TownEvent) -> Self {
        let payload = match event {
            TownEvent::PlayerJoined(player)
            | TownEvent::PlayerMoved(player)
            | TownEvent::PlayerDisconnect(player) => serde_json::to_value(player),
            TownEvent::InteractableUpdate(model) => serde_json::to_value(model),
        };
        Self::new(event.name(), payload.unwrap_or(Value::Null))
    }

    pub fn initialize(player_id: &str, town: TownSnapshot) -> Self {
        let payload = InitializePayload {
            player_id: player_id.to_string(),
            town,
        };
        Self::new(
            "initialize",
            serde_json::to_value(payload).unwrap_or(Value::Null),
        )
    }

    pub fn area_prompt(prompt: &AreaPrompt) -> Self {
        Self::new(
            "areaPrompt",
            serde_json::to_value(prompt).unwrap_or(Value::Null),
        )
    }

    pub fn error(error: String) -> Self {
        Self::new("error", serde_json::json!({ "error": error }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::StreamingAreaModel;
    use crate::player::Player;
    use serde_json::json;

    #[test]
    fn test_parse_player_movement() {
        let text = r#"{"type":"playerMovement","location":{"x":1.5,"y":2.0,"rotation":"left","moving":true}}"#;
        match serde_json::from_str::<ClientMessage>(text).unwrap() {
            ClientMessage::PlayerMovement { location } => {
                assert_eq!(location.x, 1.5);
                assert!(location.moving);
            }
            other => panic!("Expected playerMovement, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_interactable_update() {
        let text = r#"{"type":"interactableUpdate","model":{"type":"StreamingArea","id":"A1","stream":"ch1"}}"#;
        match serde_json::from_str::<ClientMessage>(text).unwrap() {
            ClientMessage::InteractableUpdate { model } => {
                assert_eq!(model.id(), "A1");
            }
            other => panic!("Expected interactableUpdate, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_client_message_rejected() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"chat","body":"hi"}"#).is_err());
    }

    #[test]
    fn test_event_envelope() {
        let event = TownEvent::InteractableUpdate(AreaModel::Streaming(StreamingAreaModel {
            id: "A1".to_string(),
            stream: Some("ch1".to_string()),
        }));

        let value = serde_json::to_value(ServerMessage::event(&event)).unwrap();
        assert_eq!(value["type"], json!("interactableUpdate"));
        assert_eq!(value["payload"]["stream"], json!("ch1"));
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_initialize_flattens_snapshot() {
        let player = Player::with_id("p1", "alice").to_model();
        let snapshot = TownSnapshot {
            town_id: "t".to_string(),
            friendly_name: "T".to_string(),
            players: vec![player],
            interactables: vec![],
        };

        let value = serde_json::to_value(ServerMessage::initialize("p1", snapshot)).unwrap();
        assert_eq!(value["type"], json!("initialize"));
        assert_eq!(value["payload"]["playerId"], json!("p1"));
        assert_eq!(value["payload"]["townId"], json!("t"));
        assert_eq!(value["payload"]["players"][0]["userName"], json!("alice"));
    }
}
