use super::*;
use serde_json::json;

#[test]
fn test_new_player_starts_at_origin_outside_areas() {
    let player = Player::new("alice");

    assert_eq!(player.user_name, "alice");
    assert_eq!(player.location.x, 0.0);
    assert!(player.interactable_id().is_none());
    assert!(Uuid::parse_str(&player.id).is_ok());
}

#[test]
fn test_player_ids_are_unique() {
    assert_ne!(Player::new("a").id, Player::new("a").id);
}

#[test]
fn test_model_serializes_wire_names() {
    let mut player = Player::with_id("p1", "bob");
    player.location.interactable_id = Some("Lobby".to_string());

    let value = serde_json::to_value(player.to_model()).unwrap();
    assert_eq!(value["userName"], json!("bob"));
    assert_eq!(value["location"]["interactableID"], json!("Lobby"));
    assert_eq!(value["location"]["rotation"], json!("front"));
}

#[test]
fn test_absent_area_is_omitted() {
    let player = Player::with_id("p1", "bob");
    let value = serde_json::to_value(player.to_model()).unwrap();

    assert!(value["location"].get("interactableID").is_none());
}

#[test]
fn test_location_deserializes_with_defaults() {
    let location: PlayerLocation = serde_json::from_value(json!({ "x": 3.0, "y": 4.0 })).unwrap();

    assert_eq!(location.rotation, Direction::Front);
    assert!(!location.moving);
    assert!(location.interactable_id.is_none());
}
