use super::*;

const SAMPLE_MAP: &str = r#"{
    "layers": [
        { "name": "Ground", "type": "tilelayer", "data": [1, 2, 3] },
        {
            "name": "Objects",
            "type": "objectgroup",
            "objects": [
                { "id": 1, "name": "Lobby", "type": "ConversationArea", "x": 0, "y": 0, "width": 100, "height": 50 },
                { "id": 2, "name": "Cinema", "class": "ViewingArea", "x": 200, "y": 0, "width": 80, "height": 80 },
                { "id": 3, "name": "Spawn", "type": "Point", "x": 5, "y": 5 }
            ]
        }
    ]
}"#;

#[test]
fn test_parse_objects_layer() {
    let map = TownMap::from_json(SAMPLE_MAP).unwrap();
    let objects = map.objects();

    assert_eq!(objects.len(), 3);
    assert_eq!(objects[0].name, "Lobby");
    assert_eq!(objects[0].width, Some(100.0));
    assert_eq!(objects[2].width, None);
    assert!(objects[0].visible);
}

#[test]
fn test_kind_name_prefers_class() {
    let map = TownMap::from_json(SAMPLE_MAP).unwrap();
    let objects = map.objects();

    assert_eq!(objects[0].kind_name(), "ConversationArea");
    assert_eq!(objects[1].kind_name(), "ViewingArea");
}

#[test]
fn test_missing_objects_layer_is_empty() {
    let map = TownMap::from_json(r#"{ "layers": [ { "name": "Ground", "type": "tilelayer" } ] }"#)
        .unwrap();
    assert!(map.objects().is_empty());
}

#[test]
fn test_kind_counts() {
    let map = TownMap::from_json(SAMPLE_MAP).unwrap();
    let counts = map.kind_counts();

    assert_eq!(counts.get("ConversationArea"), Some(&1));
    assert_eq!(counts.get("Point"), Some(&1));
}

#[test]
fn test_invalid_json_fails() {
    let result = TownMap::from_json("{ not json");
    assert!(matches!(result, Err(MapError::Parse(_))));
}
