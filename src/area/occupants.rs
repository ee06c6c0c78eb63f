use crate::player::PlayerId;

/// Ordered, duplicate-free list of the players inside one area
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OccupantRegistry {
    ids: Vec<PlayerId>,
}

impl OccupantRegistry {
    pub fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Append a player, returns false if already present
    pub fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    /// Remove a player, keeping the order of everyone else
    pub fn remove(&mut self, id: &str) -> bool {
        match self.ids.iter().position(|existing| existing == id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Occupant ids in insertion order
    pub fn ids(&self) -> &[PlayerId] {
        &self.ids
    }
}
