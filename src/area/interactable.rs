use super::error::AreaError;
use super::model::{AreaKind, AreaModel};
use super::occupants::OccupantRegistry;
use super::variant::AreaVariant;
use crate::event::TownEvent;
use crate::geometry::BoundingBox;
use crate::map::MapObject;
use crate::player::{Player, PlayerId};
use serde::Serialize;
use tracing::{debug, info};

/// A rectangular zone of the town carrying synchronized shared state
///
/// Mutations never publish anything themselves: they return the events that
/// must be broadcast, in order. `add`/`remove` keep the player's
/// `interactableID` in step with the occupant registry.
#[derive(Clone, Debug)]
pub struct InteractableArea {
    id: String,
    bounding_box: BoundingBox,
    occupants: OccupantRegistry,
    variant: AreaVariant,
}

/// Transient per-player signal produced while a player lingers in an area
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaPrompt {
    pub area_id: String,
    pub kind: AreaKind,
    /// False when nobody has set the area up yet (no topic, video or stream)
    pub active: bool,
}

impl InteractableArea {
    /// Build an area from a live model; occupants always start empty
    pub fn new(model: &AreaModel, bounding_box: BoundingBox) -> Self {
        Self {
            id: model.id().to_string(),
            bounding_box,
            occupants: OccupantRegistry::new(),
            variant: AreaVariant::from_model(model),
        }
    }

    /// Build an empty area of `kind` from a map rectangle named after the area
    pub fn from_map_object(kind: AreaKind, object: &MapObject) -> Result<Self, AreaError> {
        let (width, height) = match (object.width, object.height) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => (w, h),
            _ => {
                return Err(AreaError::MalformedGeometry {
                    object: object.name.clone(),
                })
            }
        };

        Ok(Self {
            id: object.name.clone(),
            bounding_box: BoundingBox::new(object.x, object.y, width, height),
            occupants: OccupantRegistry::new(),
            variant: AreaVariant::empty(kind),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn kind(&self) -> AreaKind {
        self.variant.kind()
    }

    pub fn occupants(&self) -> &[PlayerId] {
        self.occupants.ids()
    }

    pub fn is_active(&self) -> bool {
        self.variant.is_active()
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.bounding_box.contains(x, y)
    }

    /// Player enters the area.
    ///
    /// Emits `playerMoved` for the player; conversation areas also emit
    /// `interactableUpdate` since their model lists occupants. Adding a
    /// player who is already an occupant changes nothing.
    pub fn add(&mut self, player: &mut Player) -> Result<Vec<TownEvent>, AreaError> {
        if let Some(current) = player.interactable_id() {
            if current != self.id {
                return Err(AreaError::AlreadyInArea {
                    player_id: player.id.clone(),
                    area_id: current.to_string(),
                });
            }
        }

        let mut events = Vec::new();
        if !self.occupants.insert(&player.id) {
            return Ok(events);
        }

        player.location.interactable_id = Some(self.id.clone());
        debug!(area_id = %self.id, player_id = %player.id, "Player entered area");
        events.push(TownEvent::PlayerMoved(player.to_model()));

        if self.variant.syncs_occupants() {
            events.push(self.area_changed());
        }

        Ok(events)
    }

    /// Player leaves the area.
    ///
    /// Emits `playerMoved` with the cleared area reference, followed by one
    /// `interactableUpdate` when the shared model changed: always for
    /// conversation areas, otherwise only when the last occupant left and
    /// the variant state was reset.
    pub fn remove(&mut self, player: &mut Player) -> Result<Vec<TownEvent>, AreaError> {
        if !self.occupants.remove(&player.id) {
            return Err(AreaError::NotAnOccupant {
                player_id: player.id.clone(),
                area_id: self.id.clone(),
            });
        }

        player.location.interactable_id = None;
        debug!(area_id = %self.id, player_id = %player.id, "Player left area");

        let mut events = vec![TownEvent::PlayerMoved(player.to_model())];

        let emptied = self.occupants.is_empty();
        if emptied {
            self.variant.reset();
            info!(area_id = %self.id, kind = %self.kind(), "Area empty, state reset");
        }

        if emptied || self.variant.syncs_occupants() {
            events.push(self.area_changed());
        }

        Ok(events)
    }

    /// Apply an inbound model. The payload id is ignored; occupancy is
    /// untouched. Always emits exactly one `interactableUpdate`.
    pub fn update_model(&mut self, model: &AreaModel) -> Result<Vec<TownEvent>, AreaError> {
        if !self.variant.merge(model) {
            return Err(AreaError::KindMismatch {
                area_id: self.id.clone(),
                expected: self.kind(),
                got: model.kind(),
            });
        }

        debug!(area_id = %self.id, "Area model updated");
        Ok(vec![self.area_changed()])
    }

    /// Current snapshot of the area
    pub fn to_model(&self) -> AreaModel {
        self.variant.to_model(&self.id, self.occupants.ids())
    }

    /// Player is still inside without having crossed the boundary.
    /// Never touches shared state.
    pub fn overlap(&self, player: &Player) -> AreaPrompt {
        debug!(area_id = %self.id, player_id = %player.id, "Player overlapping area");
        AreaPrompt {
            area_id: self.id.clone(),
            kind: self.kind(),
            active: self.is_active(),
        }
    }

    fn area_changed(&self) -> TownEvent {
        TownEvent::InteractableUpdate(self.to_model())
    }
}
