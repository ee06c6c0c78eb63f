use crate::area::AreaError;
use crate::player::PlayerId;
use std::fmt;

/// Town-level errors
#[derive(Debug, Clone, PartialEq)]
pub enum TownError {
    UnknownPlayer(PlayerId),
    UnknownArea(String),
    /// Two map objects resolve to the same area id
    DuplicateArea(String),
    /// Activation requested for an area that already has a topic/video/stream
    AreaAlreadyActive(String),
    /// Activation payload does not set the area's key field
    InactivePayload(String),
    Area(AreaError),
    /// The town actor has stopped
    Closed,
}

impl From<AreaError> for TownError {
    fn from(e: AreaError) -> Self {
        TownError::Area(e)
    }
}

impl fmt::Display for TownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TownError::UnknownPlayer(id) => write!(f, "unknown player {}", id),
            TownError::UnknownArea(id) => write!(f, "unknown area '{}'", id),
            TownError::DuplicateArea(id) => write!(f, "duplicate area id '{}'", id),
            TownError::AreaAlreadyActive(id) => write!(f, "area '{}' is already active", id),
            TownError::InactivePayload(id) => {
                write!(f, "payload for area '{}' does not set a topic, video or stream", id)
            }
            TownError::Area(e) => write!(f, "{}", e),
            TownError::Closed => write!(f, "town is no longer running"),
        }
    }
}

impl std::error::Error for TownError {}
