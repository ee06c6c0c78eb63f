use super::*;
use crate::area::StreamingAreaModel;
use crate::player::Player;
use serde_json::json;

#[test]
fn test_event_names() {
    let player = Player::with_id("p1", "alice").to_model();
    let area = AreaModel::Streaming(StreamingAreaModel {
        id: "A1".to_string(),
        stream: None,
    });

    assert_eq!(TownEvent::PlayerJoined(player.clone()).name(), "playerJoined");
    assert_eq!(TownEvent::PlayerMoved(player.clone()).name(), "playerMoved");
    assert_eq!(TownEvent::PlayerDisconnect(player).name(), "playerDisconnect");
    assert_eq!(TownEvent::InteractableUpdate(area).name(), "interactableUpdate");
}

#[test]
fn test_serialized_tag_matches_name() {
    let event = TownEvent::InteractableUpdate(AreaModel::Streaming(StreamingAreaModel {
        id: "A1".to_string(),
        stream: Some("ch1".to_string()),
    }));

    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["event"], json!(event.name()));
    assert_eq!(value["payload"]["id"], json!("A1"));
    assert_eq!(value["payload"]["stream"], json!("ch1"));
}
