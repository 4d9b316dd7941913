//! Error types for combat resolution.

use thiserror::Error;

/// Result type for combat operations.
pub type CombatResult<T> = Result<T, CombatError>;

/// Errors that can occur when loading a results table or resolving a fight.
#[derive(Debug, Error)]
pub enum CombatError {
    /// The results table configuration is malformed.
    ///
    /// Carries every violation found, not just the first.
    #[error("invalid results table: {}", .0.join("; "))]
    InvalidTable(Vec<String>),

    /// The results table JSON could not be parsed.
    #[error("results table parse error: {0}")]
    TableParse(#[from] serde_json::Error),

    /// The fight reached the caller's round limit with no outcome.
    ///
    /// A configuration defect: the table fed only zero-loss rounds.
    /// Character state is left consistent with all completed rounds.
    #[error("combat stalled after {rounds} rounds with no outcome")]
    Stalled {
        /// How many rounds were played before giving up.
        rounds: u32,
    },
}
