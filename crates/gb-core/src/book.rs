//! Book data model: sections, choices, and combat encounters.
//!
//! A book is a directed graph of numbered sections. Each section carries a
//! kind tag that drives the navigation state machine, an ordered choice
//! list (the outgoing edges), and — for combat sections — an encounter
//! definition. The whole model derives serde so a host can ingest book
//! data from JSON and persist pure state without the engine touching I/O.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Static reference data for a discipline the character may possess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discipline {
    /// Stable identifier, e.g. `"healing"`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Rules text shown to the player.
    pub description: String,
}

/// A named rule adjustment attached to a combat encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CombatModifier {
    /// Additive adjustment to the character's combat skill.
    CharacterSkill(i32),
    /// Additive adjustment to the enemy's combat skill.
    EnemySkill(i32),
    /// The enemy ignores combat-skill bonuses granted by this discipline.
    ImmuneTo(String),
}

/// An antagonist defined by a combat skill and an endurance pool.
///
/// `endurance` is the enemy's starting value; it is mutated only on a
/// resolver-local copy and never written back onto the section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEncounter {
    /// Display name of the enemy.
    pub enemy_name: String,
    /// The enemy's combat skill.
    pub combat_skill: i32,
    /// The enemy's starting endurance.
    pub endurance: i32,
    /// Whether the character may abandon this fight early.
    pub can_evade: bool,
    /// Rule adjustments applied during resolution.
    #[serde(default)]
    pub modifiers: Vec<CombatModifier>,
}

/// One selectable branch out of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// The text shown to the player.
    pub text: String,
    /// The section number this choice leads to.
    pub target: u32,
    /// Whether this choice is gated by a capability requirement.
    #[serde(default)]
    pub conditional: bool,
    /// Capability required to see this choice, e.g. `"discipline:healing"`
    /// or an item name. Ineligible choices are hidden, not disabled.
    #[serde(default)]
    pub requires: Option<String>,
}

/// The kind of a section, driving the navigation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// A decision point with multiple branches.
    Choice,
    /// A fight that must be resolved before its choices appear.
    Combat,
    /// Story text with a continuation.
    Narrative,
    /// A terminal section concluding the book.
    Ending,
    /// A terminal section where the character is defeated.
    Defeat,
    /// A terminal section where the character triumphs.
    Victory,
}

impl SectionKind {
    /// Returns true for kinds that end the play session.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ending | Self::Defeat | Self::Victory)
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Choice => write!(f, "choice"),
            Self::Combat => write!(f, "combat"),
            Self::Narrative => write!(f, "narrative"),
            Self::Ending => write!(f, "ending"),
            Self::Defeat => write!(f, "defeat"),
            Self::Victory => write!(f, "victory"),
        }
    }
}

/// A numbered narrative section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSection {
    /// Unique section number within the book.
    pub section_number: u32,
    /// The narrative text.
    pub text: String,
    /// What kind of section this is.
    pub kind: SectionKind,
    /// Outgoing branches, in presentation order.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// The encounter to resolve; required when `kind` is `Combat`.
    #[serde(default)]
    pub combat: Option<CombatEncounter>,
}

/// A complete book: fixed dataset loaded once per play session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookData {
    /// Title of the series this book belongs to.
    pub series_title: String,
    /// Position of this book within the series.
    pub book_number: u32,
    /// Title of this book.
    pub title: String,
    /// Disciplines available in this book.
    #[serde(default)]
    pub disciplines: Vec<Discipline>,
    /// Opaque equipment configuration, passed through uninterpreted.
    #[serde(default)]
    pub equipment_rules: serde_json::Value,
    /// All sections, keyed by section number.
    pub sections: BTreeMap<u32, BookSection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_kind_terminal() {
        assert!(SectionKind::Ending.is_terminal());
        assert!(SectionKind::Defeat.is_terminal());
        assert!(SectionKind::Victory.is_terminal());
        assert!(!SectionKind::Choice.is_terminal());
        assert!(!SectionKind::Combat.is_terminal());
        assert!(!SectionKind::Narrative.is_terminal());
    }

    #[test]
    fn section_kind_from_json() {
        let kind: SectionKind = serde_json::from_str("\"combat\"").unwrap();
        assert_eq!(kind, SectionKind::Combat);
    }

    #[test]
    fn encounter_from_json() {
        let enc: CombatEncounter = serde_json::from_str(
            r#"{
                "enemy_name": "Giak Scout",
                "combat_skill": 12,
                "endurance": 8,
                "can_evade": true,
                "modifiers": [{"kind": "enemy_skill", "value": 2}]
            }"#,
        )
        .unwrap();
        assert_eq!(enc.enemy_name, "Giak Scout");
        assert_eq!(enc.modifiers, vec![CombatModifier::EnemySkill(2)]);
    }

    #[test]
    fn encounter_modifiers_default_empty() {
        let enc: CombatEncounter = serde_json::from_str(
            r#"{"enemy_name": "Wolf", "combat_skill": 10, "endurance": 5, "can_evade": false}"#,
        )
        .unwrap();
        assert!(enc.modifiers.is_empty());
    }

    #[test]
    fn choice_optional_fields_default() {
        let choice: Choice =
            serde_json::from_str(r#"{"text": "Continue", "target": 12}"#).unwrap();
        assert!(!choice.conditional);
        assert!(choice.requires.is_none());
    }

    #[test]
    fn book_data_roundtrip() {
        let mut sections = BTreeMap::new();
        sections.insert(
            1,
            BookSection {
                section_number: 1,
                text: "You wake at dawn.".to_string(),
                kind: SectionKind::Narrative,
                choices: vec![Choice {
                    text: "Continue".to_string(),
                    target: 2,
                    conditional: false,
                    requires: None,
                }],
                combat: None,
            },
        );
        let book = BookData {
            series_title: "Shadow Road".to_string(),
            book_number: 1,
            title: "Flight from the Dark".to_string(),
            disciplines: Vec::new(),
            equipment_rules: serde_json::Value::Null,
            sections,
        };
        let json = serde_json::to_string(&book).unwrap();
        let back: BookData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, book);
    }
}
