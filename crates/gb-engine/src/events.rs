//! State-change events for the presentation boundary.
//!
//! The engine renders nothing; it queues events as play progresses and
//! the host drains them to drive whatever UI it has.

use gb_combat::RoundRecord;
use gb_core::book::SectionKind;

use crate::state::TerminalKind;

/// A choice as presented to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    /// Index into the section's full choice list; pass back to `choose`.
    pub index: usize,
    /// The choice text.
    pub text: String,
    /// The target section number.
    pub target: u32,
}

/// A state change the host may want to render.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A section was entered.
    SectionEntered {
        /// The section number.
        number: u32,
        /// The section's kind.
        kind: SectionKind,
    },
    /// The eligible choice set for the current section.
    ChoicesAvailable {
        /// The visible choices, ineligible ones already filtered out.
        choices: Vec<ChoiceView>,
    },
    /// One combat round was resolved.
    CombatRoundResolved {
        /// The enemy being fought.
        enemy: String,
        /// What happened in the round.
        record: RoundRecord,
    },
    /// A terminal section was reached; the session is over.
    TerminalReached {
        /// Which kind of terminal.
        kind: TerminalKind,
    },
}
