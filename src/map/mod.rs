use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

#[cfg(test)]
mod tests;

/// Name of the object layer that carries interactable areas
pub const OBJECTS_LAYER: &str = "Objects";

/// Tiled-style map description (only the parts the town needs)
#[derive(Clone, Debug, Deserialize)]
pub struct TownMap {
    #[serde(default)]
    pub layers: Vec<MapLayer>,
}

/// One map layer; tile layers carry no objects and are skipped
#[derive(Clone, Debug, Deserialize)]
pub struct MapLayer {
    pub name: String,
    #[serde(rename = "type", default)]
    pub layer_type: String,
    #[serde(default)]
    pub objects: Vec<MapObject>,
}

/// A rectangle-bearing map object
///
/// Width and height are optional here because point objects omit them;
/// areas reject such objects at construction time.
#[derive(Clone, Debug, Deserialize)]
pub struct MapObject {
    pub id: i64,
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(rename = "type", default)]
    pub object_type: String,
    /// Newer Tiled versions write `class` instead of `type`
    #[serde(default)]
    pub class: String,
    /// Hidden objects are left out of the town
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl MapObject {
    /// Declared kind of the object, preferring `class` when present
    pub fn kind_name(&self) -> &str {
        if self.class.is_empty() {
            &self.object_type
        } else {
            &self.class
        }
    }
}

impl TownMap {
    /// Parse a map from its JSON text
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        serde_json::from_str(json).map_err(|e| MapError::Parse(e.to_string()))
    }

    /// Objects of the `Objects` layer, or nothing if the map has no such layer
    pub fn objects(&self) -> &[MapObject] {
        self.layers
            .iter()
            .find(|layer| layer.name == OBJECTS_LAYER)
            .map(|layer| layer.objects.as_slice())
            .unwrap_or(&[])
    }

    /// Count objects per declared kind (used for load logging)
    pub fn kind_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for object in self.objects() {
            *counts.entry(object.kind_name().to_string()).or_insert(0) += 1;
        }
        counts
    }
}

/// Map loading errors
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    Parse(String),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Parse(e) => write!(f, "invalid map description: {}", e),
        }
    }
}

impl std::error::Error for MapError {}
