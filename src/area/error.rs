use super::AreaKind;
use crate::player::PlayerId;
use std::fmt;

/// Errors raised by area construction and area mutations
///
/// Every check runs before any state is touched, so a returned error means
/// the area is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq)]
pub enum AreaError {
    /// Map object without a positive width and height
    MalformedGeometry { object: String },
    /// Player is already bound to a different area
    AlreadyInArea {
        player_id: PlayerId,
        area_id: String,
    },
    /// Player is not an occupant of the area it is being removed from
    NotAnOccupant {
        player_id: PlayerId,
        area_id: String,
    },
    /// Inbound model is for a different kind of area
    KindMismatch {
        area_id: String,
        expected: AreaKind,
        got: AreaKind,
    },
}

impl fmt::Display for AreaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaError::MalformedGeometry { object } => {
                write!(f, "malformed area '{}': width and height must be present and positive", object)
            }
            AreaError::AlreadyInArea { player_id, area_id } => {
                write!(f, "player {} is already in area '{}'", player_id, area_id)
            }
            AreaError::NotAnOccupant { player_id, area_id } => {
                write!(f, "player {} is not an occupant of area '{}'", player_id, area_id)
            }
            AreaError::KindMismatch {
                area_id,
                expected,
                got,
            } => {
                write!(f, "area '{}' is a {}, got a {} model", area_id, expected, got)
            }
        }
    }
}

impl std::error::Error for AreaError {}
