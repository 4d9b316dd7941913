//! Error types for the play session.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while running a play session.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The selected choice index is not in the current eligible set.
    #[error("invalid choice: {0}")]
    InvalidChoice(usize),

    /// The session has reached a terminal section; no transitions remain.
    #[error("session is over; no further transitions")]
    SessionOver,

    /// A fight was requested outside a combat section.
    #[error("not in combat")]
    NotInCombat,

    /// A choice was selected while the section's combat is unresolved.
    #[error("combat must be resolved before choosing")]
    CombatPending,

    /// Core data error.
    #[error(transparent)]
    Core(#[from] gb_core::CoreError),

    /// Combat resolution error.
    #[error(transparent)]
    Combat(#[from] gb_combat::CombatError),
}
