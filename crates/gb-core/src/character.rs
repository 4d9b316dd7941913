//! The character record and its progression rules.
//!
//! A character is generated once (stats from the digit source), then
//! mutated through the methods here on every combat round, item change,
//! and section advance. Base stats are private so they stay immutable
//! after generation; endurance moves only through the clamping mutator.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rng::DigitRng;

/// Unique identifier for a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    /// Generate a new random character ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Which inventory a granted item goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSlot {
    /// Carried weapons.
    Weapon,
    /// General backpack items.
    Backpack,
    /// Quest and special items.
    Special,
}

/// The single active character record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Unique identifier.
    pub id: CharacterId,
    /// Player-chosen name.
    pub name: String,
    combat_skill: i32,
    max_endurance: i32,
    current_endurance: i32,
    /// Discipline IDs the character has learned.
    pub disciplines: BTreeSet<String>,
    /// Carried weapons.
    pub weapons: Vec<String>,
    /// Backpack items.
    pub backpack: Vec<String>,
    /// Special and quest items.
    pub special_items: Vec<String>,
    /// Gold crowns held; never negative.
    pub gold_crowns: u32,
    /// The book the character is currently playing.
    pub current_book: u32,
    /// The section the character is currently at.
    pub current_section: u32,
    /// How many books have been completed.
    pub books_completed: u32,
    /// When the character was created.
    pub created_at: DateTime<Utc>,
    /// When the character last advanced a section.
    pub last_played: DateTime<Utc>,
}

impl Character {
    /// Generate a fresh character.
    ///
    /// Combat skill is 10 plus one digit draw, endurance 20 plus one digit
    /// draw, so `10..=19` and `20..=29` respectively. Deterministic given a
    /// deterministic digit source.
    pub fn generate(name: impl Into<String>, rng: &mut dyn DigitRng) -> Self {
        let combat_skill = 10 + i32::from(rng.next_digit());
        let max_endurance = 20 + i32::from(rng.next_digit());
        let now = Utc::now();
        Self {
            id: CharacterId::new(),
            name: name.into(),
            combat_skill,
            max_endurance,
            current_endurance: max_endurance,
            disciplines: BTreeSet::new(),
            weapons: Vec::new(),
            backpack: Vec::new(),
            special_items: Vec::new(),
            gold_crowns: 0,
            current_book: 1,
            current_section: 1,
            books_completed: 0,
            created_at: now,
            last_played: now,
        }
    }

    /// The character's fixed combat skill.
    pub fn combat_skill(&self) -> i32 {
        self.combat_skill
    }

    /// The character's fixed maximum endurance.
    pub fn max_endurance(&self) -> i32 {
        self.max_endurance
    }

    /// The character's current endurance.
    pub fn current_endurance(&self) -> i32 {
        self.current_endurance
    }

    /// Apply an endurance delta, clamping to `[0, max_endurance]`.
    /// Returns the new value.
    pub fn apply_endurance_delta(&mut self, amount: i32) -> i32 {
        self.current_endurance =
            (self.current_endurance + amount).clamp(0, self.max_endurance);
        self.current_endurance
    }

    /// Returns true once endurance has reached 0.
    ///
    /// The navigation layer uses this to route to a defeat section
    /// regardless of the graph's declared targets.
    pub fn is_defeated(&self) -> bool {
        self.current_endurance == 0
    }

    /// Test a capability requirement from a choice's `requires` field.
    ///
    /// Accepts `discipline:<id>`, `item:<name>`, or a bare name matched
    /// against disciplines and all three inventories. Matching is
    /// case-insensitive.
    pub fn has_capability(&self, requirement: &str) -> bool {
        if let Some(id) = requirement.strip_prefix("discipline:") {
            return self.has_discipline(id.trim());
        }
        if let Some(name) = requirement.strip_prefix("item:") {
            return self.has_item(name.trim());
        }
        self.has_discipline(requirement) || self.has_item(requirement)
    }

    /// Returns true if the character has learned the discipline.
    pub fn has_discipline(&self, id: &str) -> bool {
        self.disciplines.iter().any(|d| d.eq_ignore_ascii_case(id))
    }

    /// Returns true if any inventory contains the named item.
    pub fn has_item(&self, name: &str) -> bool {
        self.weapons
            .iter()
            .chain(&self.backpack)
            .chain(&self.special_items)
            .any(|i| i.eq_ignore_ascii_case(name))
    }

    /// Record a new position and refresh the last-played timestamp.
    pub fn advance_section(&mut self, book: u32, section: u32) {
        self.current_book = book;
        self.current_section = section;
        self.last_played = Utc::now();
    }

    /// Add an item to the given inventory. Duplicates are kept; gamebook
    /// items stack (two Meals are two Meals).
    pub fn grant_item(&mut self, slot: ItemSlot, name: impl Into<String>) {
        let name = name.into();
        match slot {
            ItemSlot::Weapon => self.weapons.push(name),
            ItemSlot::Backpack => self.backpack.push(name),
            ItemSlot::Special => self.special_items.push(name),
        }
    }

    /// Remove one instance of the named item from whichever inventory
    /// holds it. Returns true if anything was removed.
    pub fn remove_item(&mut self, name: &str) -> bool {
        for list in [
            &mut self.weapons,
            &mut self.backpack,
            &mut self.special_items,
        ] {
            if let Some(pos) = list.iter().position(|i| i.eq_ignore_ascii_case(name)) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    /// Adjust gold crowns by a delta, clamping at 0. Returns the new total.
    pub fn adjust_gold(&mut self, amount: i64) -> u32 {
        let total = i64::from(self.gold_crowns) + amount;
        self.gold_crowns = u32::try_from(total.max(0)).unwrap_or(u32::MAX);
        self.gold_crowns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedDigits;

    fn test_character() -> Character {
        let mut rng = FixedDigits::new(vec![5, 5]).unwrap();
        Character::generate("Hero", &mut rng)
    }

    #[test]
    fn generate_stats_from_digits() {
        let mut rng = FixedDigits::new(vec![3, 7]).unwrap();
        let c = Character::generate("Hero", &mut rng);
        assert_eq!(c.combat_skill(), 13);
        assert_eq!(c.max_endurance(), 27);
        assert_eq!(c.current_endurance(), 27);
        assert_eq!(c.current_book, 1);
        assert_eq!(c.current_section, 1);
        assert_eq!(c.books_completed, 0);
        assert!(c.disciplines.is_empty());
        assert!(c.weapons.is_empty());
        assert_eq!(c.gold_crowns, 0);
    }

    #[test]
    fn generate_stats_within_bounds() {
        let mut rng = crate::rng::StdDigits::seeded(7);
        for _ in 0..100 {
            let c = Character::generate("Hero", &mut rng);
            assert!((10..=19).contains(&c.combat_skill()));
            assert!((20..=29).contains(&c.max_endurance()));
            assert_eq!(c.current_endurance(), c.max_endurance());
        }
    }

    #[test]
    fn endurance_clamps_at_zero() {
        let mut c = test_character();
        assert_eq!(c.apply_endurance_delta(-100), 0);
        assert!(c.is_defeated());
        // Re-clamping is idempotent: never negative
        assert_eq!(c.apply_endurance_delta(-5), 0);
    }

    #[test]
    fn endurance_clamps_at_max() {
        let mut c = test_character();
        c.apply_endurance_delta(-3);
        assert_eq!(c.apply_endurance_delta(50), c.max_endurance());
    }

    #[test]
    fn endurance_normal_delta() {
        let mut c = test_character();
        let max = c.max_endurance();
        assert_eq!(c.apply_endurance_delta(-4), max - 4);
        assert!(!c.is_defeated());
    }

    #[test]
    fn capability_by_discipline() {
        let mut c = test_character();
        assert!(!c.has_capability("discipline:healing"));
        c.disciplines.insert("healing".to_string());
        assert!(c.has_capability("discipline:healing"));
        assert!(c.has_capability("discipline:Healing"));
        assert!(c.has_capability("healing"));
    }

    #[test]
    fn capability_by_item() {
        let mut c = test_character();
        assert!(!c.has_capability("item:Rope"));
        c.grant_item(ItemSlot::Backpack, "Rope");
        assert!(c.has_capability("item:Rope"));
        assert!(c.has_capability("rope"));
        c.grant_item(ItemSlot::Weapon, "Short Sword");
        c.grant_item(ItemSlot::Special, "Seal of Hammerdal");
        assert!(c.has_capability("item:short sword"));
        assert!(c.has_capability("Seal of Hammerdal"));
    }

    #[test]
    fn remove_item_searches_all_slots() {
        let mut c = test_character();
        c.grant_item(ItemSlot::Weapon, "Axe");
        c.grant_item(ItemSlot::Backpack, "Meal");
        c.grant_item(ItemSlot::Backpack, "Meal");
        assert!(c.remove_item("Axe"));
        assert!(!c.has_item("Axe"));
        // Only one instance of a stacked item goes
        assert!(c.remove_item("Meal"));
        assert!(c.has_item("Meal"));
        assert!(!c.remove_item("Axe"));
    }

    #[test]
    fn gold_never_negative() {
        let mut c = test_character();
        c.adjust_gold(12);
        assert_eq!(c.gold_crowns, 12);
        assert_eq!(c.adjust_gold(-20), 0);
        assert_eq!(c.adjust_gold(5), 5);
    }

    #[test]
    fn advance_section_updates_position() {
        let mut c = test_character();
        let before = c.last_played;
        c.advance_section(2, 117);
        assert_eq!(c.current_book, 2);
        assert_eq!(c.current_section, 117);
        assert!(c.last_played >= before);
    }

    #[test]
    fn serde_roundtrip() {
        let mut c = test_character();
        c.disciplines.insert("camouflage".to_string());
        c.grant_item(ItemSlot::Weapon, "Sword");
        let json = serde_json::to_string(&c).unwrap();
        let back: Character = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
