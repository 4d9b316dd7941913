//! Navigation states.

use gb_core::book::SectionKind;

/// The kind of terminal section that ended the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalKind {
    /// The book concluded.
    Ending,
    /// The character was defeated.
    Defeat,
    /// The character triumphed.
    Victory,
}

impl TerminalKind {
    /// Map a terminal section kind to its terminal state, if any.
    pub fn from_section(kind: SectionKind) -> Option<Self> {
        match kind {
            SectionKind::Ending => Some(Self::Ending),
            SectionKind::Defeat => Some(Self::Defeat),
            SectionKind::Victory => Some(Self::Victory),
            SectionKind::Choice | SectionKind::Combat | SectionKind::Narrative => None,
        }
    }
}

impl std::fmt::Display for TerminalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ending => write!(f, "ending"),
            Self::Defeat => write!(f, "defeat"),
            Self::Victory => write!(f, "victory"),
        }
    }
}

/// Where the session currently sits in one page of play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    /// Story text with a continuation choice.
    Narrative,
    /// A decision point awaiting a choice.
    AwaitingChoice,
    /// A combat section whose fight is unresolved; choices stay hidden.
    InCombat,
    /// A terminal section; the play session is over.
    Terminal(TerminalKind),
}

impl NavState {
    /// Returns true if choices may currently be selected.
    pub fn accepts_choices(self) -> bool {
        matches!(self, Self::Narrative | Self::AwaitingChoice)
    }
}
