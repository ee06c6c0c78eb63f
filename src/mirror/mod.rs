use crate::area::{AreaKind, AreaModel};
use crate::player::PlayerId;
use std::fmt;


/// A field-level change observed while reconciling a snapshot
#[derive(Clone, Debug, PartialEq)]
pub enum AreaChange {
    TopicChanged(Option<String>),
    OccupantsChanged(Vec<PlayerId>),
    VideoChanged(Option<String>),
    PlaybackChanged { is_playing: bool, elapsed_time_sec: f64 },
    StreamChanged(Option<String>),
}

/// Local copy of one area's model, kept in step with `interactableUpdate`
///
/// Incoming snapshots replace the copy wholesale; the returned changes only
/// describe fields whose value actually differs.
#[derive(Clone, Debug)]
pub struct AreaMirror {
    model: AreaModel,
}

impl AreaMirror {
    pub fn new(model: AreaModel) -> Self {
        Self { model }
    }

    /// Bound id; never changes after construction
    pub fn id(&self) -> &str {
        self.model.id()
    }

    pub fn kind(&self) -> AreaKind {
        self.model.kind()
    }

    pub fn model(&self) -> &AreaModel {
        &self.model
    }

    /// Reconcile an authoritative snapshot
    pub fn apply(&mut self, update: &AreaModel) -> Result<Vec<AreaChange>, MirrorError> {
        if update.id() != self.id() {
            return Err(MirrorError::WrongArea {
                expected: self.id().to_string(),
                got: update.id().to_string(),
            });
        }

        let mut changes = Vec::new();
        match (&mut self.model, update) {
            (AreaModel::Conversation(local), AreaModel::Conversation(remote)) => {
                if local.topic != remote.topic {
                    local.topic = remote.topic.clone();
                    changes.push(AreaChange::TopicChanged(local.topic.clone()));
                }
                if local.occupants_by_id != remote.occupants_by_id {
                    local.occupants_by_id = remote.occupants_by_id.clone();
                    changes.push(AreaChange::OccupantsChanged(local.occupants_by_id.clone()));
                }
            }
            (AreaModel::Viewing(local), AreaModel::Viewing(remote)) => {
                if local.video != remote.video {
                    local.video = remote.video.clone();
                    changes.push(AreaChange::VideoChanged(local.video.clone()));
                }
                if local.is_playing != remote.is_playing
                    || local.elapsed_time_sec != remote.elapsed_time_sec
                {
                    local.is_playing = remote.is_playing;
                    local.elapsed_time_sec = remote.elapsed_time_sec;
                    changes.push(AreaChange::PlaybackChanged {
                        is_playing: local.is_playing,
                        elapsed_time_sec: local.elapsed_time_sec,
                    });
                }
            }
            (AreaModel::Streaming(local), AreaModel::Streaming(remote)) => {
                if local.stream != remote.stream {
                    local.stream = remote.stream.clone();
                    changes.push(AreaChange::StreamChanged(local.stream.clone()));
                }
            }
            (local, remote) => {
                return Err(MirrorError::WrongKind {
                    expected: local.kind(),
                    got: remote.kind(),
                })
            }
        }

        Ok(changes)
    }
}

/// Snapshot could not be reconciled with this mirror
#[derive(Debug, Clone, PartialEq)]
pub enum MirrorError {
    WrongArea { expected: String, got: String },
    WrongKind { expected: AreaKind, got: AreaKind },
}

impl fmt::Display for MirrorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirrorError::WrongArea { expected, got } => {
                write!(f, "update for area '{}' sent to mirror of '{}'", got, expected)
            }
            MirrorError::WrongKind { expected, got } => {
                write!(f, "{} update sent to a {} mirror", got, expected)
            }
        }
    }
}

impl std::error::Error for MirrorError {}
