use crate::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of interactable area kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaKind {
    #[serde(rename = "ConversationArea")]
    Conversation,
    #[serde(rename = "ViewingArea")]
    Viewing,
    #[serde(rename = "StreamingArea")]
    Streaming,
}

impl AreaKind {
    /// Map-object type name for this kind
    pub fn type_name(&self) -> &'static str {
        match self {
            AreaKind::Conversation => "ConversationArea",
            AreaKind::Viewing => "ViewingArea",
            AreaKind::Streaming => "StreamingArea",
        }
    }

    /// Resolve a map-object type name; unknown names are not areas
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "ConversationArea" => Some(AreaKind::Conversation),
            "ViewingArea" => Some(AreaKind::Viewing),
            "StreamingArea" => Some(AreaKind::Streaming),
            _ => None,
        }
    }
}

impl fmt::Display for AreaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Conversation group: a topic plus the players taking part
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationAreaModel {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(rename = "occupantsByID", default)]
    pub occupants_by_id: Vec<PlayerId>,
}

/// Shared video playback
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewingAreaModel {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub elapsed_time_sec: f64,
}

/// Shared live stream; `stream` is an opaque channel token
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamingAreaModel {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,
}

/// Synchronized snapshot of one area, tagged by kind on the wire
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AreaModel {
    #[serde(rename = "ConversationArea")]
    Conversation(ConversationAreaModel),
    #[serde(rename = "ViewingArea")]
    Viewing(ViewingAreaModel),
    #[serde(rename = "StreamingArea")]
    Streaming(StreamingAreaModel),
}

impl AreaModel {
    pub fn id(&self) -> &str {
        match self {
            AreaModel::Conversation(m) => &m.id,
            AreaModel::Viewing(m) => &m.id,
            AreaModel::Streaming(m) => &m.id,
        }
    }

    pub fn kind(&self) -> AreaKind {
        match self {
            AreaModel::Conversation(_) => AreaKind::Conversation,
            AreaModel::Viewing(_) => AreaKind::Viewing,
            AreaModel::Streaming(_) => AreaKind::Streaming,
        }
    }
}
