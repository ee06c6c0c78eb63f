use super::model::{
    AreaKind, AreaModel, ConversationAreaModel, StreamingAreaModel, ViewingAreaModel,
};
use crate::player::PlayerId;

/// Variant-specific state of an area
///
/// Each variant decides three things: what it resets to when the area
/// empties, how an inbound model merges into it, and what its snapshot holds.
#[derive(Clone, Debug, PartialEq)]
pub enum AreaVariant {
    Conversation {
        topic: Option<String>,
    },
    Viewing {
        video: Option<String>,
        is_playing: bool,
        elapsed_time_sec: f64,
    },
    Streaming {
        stream: Option<String>,
    },
}

impl AreaVariant {
    /// Empty state of a kind
    pub fn empty(kind: AreaKind) -> Self {
        match kind {
            AreaKind::Conversation => AreaVariant::Conversation { topic: None },
            AreaKind::Viewing => AreaVariant::Viewing {
                video: None,
                is_playing: false,
                elapsed_time_sec: 0.0,
            },
            AreaKind::Streaming => AreaVariant::Streaming { stream: None },
        }
    }

    /// Initial state taken from a live model
    pub fn from_model(model: &AreaModel) -> Self {
        let mut variant = Self::empty(model.kind());
        variant.merge(model);
        variant
    }

    pub fn kind(&self) -> AreaKind {
        match self {
            AreaVariant::Conversation { .. } => AreaKind::Conversation,
            AreaVariant::Viewing { .. } => AreaKind::Viewing,
            AreaVariant::Streaming { .. } => AreaKind::Streaming,
        }
    }

    /// Whether the area's key field is set (topic, video or stream)
    pub fn is_active(&self) -> bool {
        match self {
            AreaVariant::Conversation { topic } => topic.is_some(),
            AreaVariant::Viewing { video, .. } => video.is_some(),
            AreaVariant::Streaming { stream } => stream.is_some(),
        }
    }

    /// Whether occupancy is part of the synchronized model
    pub fn syncs_occupants(&self) -> bool {
        matches!(self, AreaVariant::Conversation { .. })
    }

    /// Reset-on-empty hook
    pub fn reset(&mut self) {
        *self = Self::empty(self.kind());
    }

    /// Merge variant fields from an inbound model.
    ///
    /// Returns false (and leaves state untouched) when the model is for
    /// another kind. Ids and conversation occupants are never taken from
    /// the payload.
    pub fn merge(&mut self, model: &AreaModel) -> bool {
        match (self, model) {
            (AreaVariant::Conversation { topic }, AreaModel::Conversation(m)) => {
                *topic = m.topic.clone();
            }
            (
                AreaVariant::Viewing {
                    video,
                    is_playing,
                    elapsed_time_sec,
                },
                AreaModel::Viewing(m),
            ) => {
                *video = m.video.clone();
                *is_playing = m.is_playing;
                *elapsed_time_sec = m.elapsed_time_sec;
            }
            (AreaVariant::Streaming { stream }, AreaModel::Streaming(m)) => {
                *stream = m.stream.clone();
            }
            _ => return false,
        }
        true
    }

    /// Snapshot of this variant under the given area id
    pub fn to_model(&self, id: &str, occupants: &[PlayerId]) -> AreaModel {
        match self {
            AreaVariant::Conversation { topic } => AreaModel::Conversation(ConversationAreaModel {
                id: id.to_string(),
                topic: topic.clone(),
                occupants_by_id: occupants.to_vec(),
            }),
            AreaVariant::Viewing {
                video,
                is_playing,
                elapsed_time_sec,
            } => AreaModel::Viewing(ViewingAreaModel {
                id: id.to_string(),
                video: video.clone(),
                is_playing: *is_playing,
                elapsed_time_sec: *elapsed_time_sec,
            }),
            AreaVariant::Streaming { stream } => AreaModel::Streaming(StreamingAreaModel {
                id: id.to_string(),
                stream: stream.clone(),
            }),
        }
    }
}
