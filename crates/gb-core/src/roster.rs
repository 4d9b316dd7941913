//! Saved-character roster.
//!
//! Pure state for the host's persistence layer: a collection of saved
//! characters plus one "current character" slot. The engine never
//! serializes this to storage itself; the host decides where it lives.

use serde::{Deserialize, Serialize};

use crate::character::{Character, CharacterId};
use crate::error::{CoreError, CoreResult};

/// All saved characters plus the active slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterRoster {
    characters: Vec<Character>,
    current: Option<CharacterId>,
}

impl CharacterRoster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a character, replacing any existing entry with the same ID.
    pub fn save(&mut self, character: Character) {
        match self.characters.iter_mut().find(|c| c.id == character.id) {
            Some(slot) => *slot = character,
            None => self.characters.push(character),
        }
    }

    /// Look up a saved character by ID.
    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Remove a character. Clears the current slot if it pointed there.
    /// Returns the removed character, if any.
    pub fn remove(&mut self, id: CharacterId) -> Option<Character> {
        let pos = self.characters.iter().position(|c| c.id == id)?;
        if self.current == Some(id) {
            self.current = None;
        }
        Some(self.characters.remove(pos))
    }

    /// Mark a saved character as the current one.
    pub fn set_current(&mut self, id: CharacterId) -> CoreResult<()> {
        if self.get(id).is_none() {
            return Err(CoreError::CharacterNotFound(id));
        }
        self.current = Some(id);
        Ok(())
    }

    /// The current character, if one is selected.
    pub fn current(&self) -> Option<&Character> {
        self.current.and_then(|id| self.get(id))
    }

    /// Iterate over all saved characters.
    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    /// Number of saved characters.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Returns true if no characters are saved.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}
