use super::directory::AreaDirectory;
use super::error::TownError;
use crate::area::{AreaError, AreaKind, AreaModel, AreaPrompt, AreaVariant, InteractableArea};
use crate::event::TownEvent;
use crate::map::TownMap;
use crate::player::{Player, PlayerId, PlayerLocation, PlayerModel};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Full state of a town, sent to clients when they connect
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TownSnapshot {
    pub town_id: String,
    pub friendly_name: String,
    pub players: Vec<PlayerModel>,
    pub interactables: Vec<AreaModel>,
}

/// Outcome of a player movement
#[derive(Debug, Default, PartialEq)]
pub struct MoveOutcome {
    pub events: Vec<TownEvent>,
    /// Transient prompt for the moving player only, never broadcast
    pub prompt: Option<AreaPrompt>,
}

/// One shared space: its players and its interactable areas
///
/// Not synchronized; a town is owned by exactly one task (see `TownHandle`).
#[derive(Debug)]
pub struct Town {
    id: String,
    friendly_name: String,
    players: HashMap<PlayerId, Player>,
    join_order: Vec<PlayerId>,
    directory: AreaDirectory,
}

impl Town {
    pub fn new(id: &str, friendly_name: &str) -> Self {
        Self {
            id: id.to_string(),
            friendly_name: friendly_name.to_string(),
            players: HashMap::new(),
            join_order: Vec::new(),
            directory: AreaDirectory::new(),
        }
    }

    /// Build a town from a map description.
    ///
    /// Every visible object of a known area kind becomes an area; one
    /// malformed area fails the whole load.
    pub fn from_map(id: &str, friendly_name: &str, map: &TownMap) -> Result<Self, TownError> {
        let mut town = Self::new(id, friendly_name);

        for object in map.objects() {
            if !object.visible {
                debug!(object = %object.name, "Skipping hidden map object");
                continue;
            }
            match AreaKind::from_type_name(object.kind_name()) {
                Some(kind) => town.add_area(InteractableArea::from_map_object(kind, object)?)?,
                None => debug!(object = %object.name, kind = %object.kind_name(), "Skipping non-area map object"),
            }
        }

        for (a, b) in town.directory.overlapping_pairs() {
            warn!(
                town_id = %town.id,
                first = %a,
                second = %b,
                "Overlapping areas in map; the first registered area wins"
            );
        }

        info!(
            town_id = %town.id,
            areas = town.directory.len(),
            "Town loaded from map"
        );

        Ok(town)
    }

    pub fn add_area(&mut self, area: InteractableArea) -> Result<(), TownError> {
        self.directory.register(area)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn friendly_name(&self) -> &str {
        &self.friendly_name
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.get(player_id)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn area(&self, area_id: &str) -> Option<&InteractableArea> {
        self.directory.get(area_id)
    }

    pub fn areas(&self) -> impl Iterator<Item = &InteractableArea> {
        self.directory.iter()
    }

    /// Create a player at the spawn point
    pub fn add_player(&mut self, user_name: &str) -> (PlayerModel, Vec<TownEvent>) {
        let player = Player::new(user_name);
        let model = player.to_model();

        info!(town_id = %self.id, player_id = %player.id, user_name = %user_name, "Player joined");

        self.join_order.push(player.id.clone());
        self.players.insert(player.id.clone(), player);

        (model.clone(), vec![TownEvent::PlayerJoined(model)])
    }

    /// Move a player and reconcile its area membership.
    ///
    /// The inbound `interactableID` is ignored: the town owns that field.
    /// At least one `playerMoved` for the mover is part of the result; a
    /// trailing one is added when no area transition emitted it.
    pub fn update_player_location(
        &mut self,
        player_id: &str,
        location: PlayerLocation,
    ) -> Result<MoveOutcome, TownError> {
        let player = self
            .players
            .get_mut(player_id)
            .ok_or_else(|| TownError::UnknownPlayer(player_id.to_string()))?;

        let previous = player.location.clone();
        player.location = PlayerLocation {
            interactable_id: previous.interactable_id.clone(),
            ..location
        };

        let transition = match self.directory.move_player(player) {
            Ok(transition) => transition,
            Err(e) => {
                player.location = previous;
                return Err(e.into());
            }
        };

        let mut events = transition.events;
        let mover_announced = events
            .iter()
            .any(|e| matches!(e, TownEvent::PlayerMoved(m) if m.id == player.id));
        if !mover_announced {
            events.push(TownEvent::PlayerMoved(player.to_model()));
        }

        Ok(MoveOutcome {
            events,
            prompt: transition.prompt,
        })
    }

    /// Remove a player, leaving its area first
    pub fn remove_player(&mut self, player_id: &str) -> Result<Vec<TownEvent>, TownError> {
        let player = self
            .players
            .get_mut(player_id)
            .ok_or_else(|| TownError::UnknownPlayer(player_id.to_string()))?;

        let mut events = Vec::new();
        if let Some(area_id) = player.interactable_id().map(str::to_string) {
            if let Some(area) = self.directory.get_mut(&area_id) {
                events.extend(area.remove(player)?);
            }
        }

        if let Some(player) = self.players.remove(player_id) {
            self.join_order.retain(|id| id != player_id);
            info!(town_id = %self.id, player_id = %player_id, "Player left");
            events.push(TownEvent::PlayerDisconnect(player.to_model()));
        }

        Ok(events)
    }

    /// Route an inbound model to its area
    pub fn apply_area_update(&mut self, model: &AreaModel) -> Result<Vec<TownEvent>, TownError> {
        let area = self
            .directory
            .get_mut(model.id())
            .ok_or_else(|| TownError::UnknownArea(model.id().to_string()))?;

        Ok(area.update_model(model)?)
    }

    /// Give an inactive area its first topic, video or stream
    pub fn activate_area(&mut self, model: &AreaModel) -> Result<Vec<TownEvent>, TownError> {
        let area = self
            .directory
            .get_mut(model.id())
            .ok_or_else(|| TownError::UnknownArea(model.id().to_string()))?;

        if area.kind() != model.kind() {
            return Err(TownError::Area(AreaError::KindMismatch {
                area_id: area.id().to_string(),
                expected: area.kind(),
                got: model.kind(),
            }));
        }
        if area.is_active() {
            return Err(TownError::AreaAlreadyActive(area.id().to_string()));
        }
        if !AreaVariant::from_model(model).is_active() {
            return Err(TownError::InactivePayload(area.id().to_string()));
        }

        info!(town_id = %self.id, area_id = %area.id(), kind = %area.kind(), "Area activated");
        Ok(area.update_model(model)?)
    }

    pub fn snapshot(&self) -> TownSnapshot {
        TownSnapshot {
            town_id: self.id.clone(),
            friendly_name: self.friendly_name.clone(),
            players: self
                .join_order
                .iter()
                .filter_map(|id| self.players.get(id))
                .map(Player::to_model)
                .collect(),
            interactables: self.directory.iter().map(InteractableArea::to_model).collect(),
        }
    }
}
