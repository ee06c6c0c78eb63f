use super::error::TownError;
use crate::area::{AreaError, AreaPrompt, InteractableArea};
use crate::event::TownEvent;
use crate::player::Player;
use tracing::warn;

/// Result of reconciling one movement against the town's areas
#[derive(Debug, Default, PartialEq)]
pub struct Transition {
    pub events: Vec<TownEvent>,
    /// Set when the player stayed inside the same area
    pub prompt: Option<AreaPrompt>,
}

/// Areas of one town in registration order
///
/// Resolves a position to at most one area and drives the add/remove/overlap
/// calls as players move. Areas are expected not to overlap; if a map breaks
/// that rule the first registered area wins.
#[derive(Debug, Default)]
pub struct AreaDirectory {
    areas: Vec<InteractableArea>,
}

impl AreaDirectory {
    pub fn new() -> Self {
        Self { areas: Vec::new() }
    }

    /// Register an area; ids must be unique within the town
    pub fn register(&mut self, area: InteractableArea) -> Result<(), TownError> {
        if self.get(area.id()).is_some() {
            return Err(TownError::DuplicateArea(area.id().to_string()));
        }
        self.areas.push(area);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InteractableArea> {
        self.areas.iter()
    }

    pub fn get(&self, id: &str) -> Option<&InteractableArea> {
        self.areas.iter().find(|area| area.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut InteractableArea> {
        self.areas.iter_mut().find(|area| area.id() == id)
    }

    /// First registered area containing the point
    pub fn area_at(&self, x: f64, y: f64) -> Option<&InteractableArea> {
        self.areas.iter().find(|area| area.contains(x, y))
    }

    /// Pairs of area ids whose rectangles overlap (a map-authoring error)
    pub fn overlapping_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (i, a) in self.areas.iter().enumerate() {
            for b in &self.areas[i + 1..] {
                if a.bounding_box().overlaps(b.bounding_box()) {
                    pairs.push((a.id().to_string(), b.id().to_string()));
                }
            }
        }
        pairs
    }

    /// Reconcile the player's area binding with its (already updated) position.
    ///
    /// Leaving an area is always processed before entering the next one.
    pub fn move_player(&mut self, player: &mut Player) -> Result<Transition, AreaError> {
        let previous = player.interactable_id().map(str::to_string);
        let next = self
            .areas
            .iter()
            .position(|area| area.contains(player.location.x, player.location.y));
        let next_id = next.map(|index| self.areas[index].id().to_string());

        let mut transition = Transition::default();

        if previous == next_id {
            if let Some(index) = next {
                transition.prompt = Some(self.areas[index].overlap(player));
            }
            return Ok(transition);
        }

        if let Some(previous_id) = previous {
            match self.get_mut(&previous_id) {
                Some(area) => transition.events.extend(area.remove(player)?),
                None => {
                    warn!(
                        player_id = %player.id,
                        area_id = %previous_id,
                        "Player bound to unknown area, clearing binding"
                    );
                    player.location.interactable_id = None;
                }
            }
        }

        if let Some(index) = next {
            transition.events.extend(self.areas[index].add(player)?);
        }

        Ok(transition)
    }
}
