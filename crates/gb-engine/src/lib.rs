//! Navigation state machine and play session for the gamebook engine.
//!
//! Orchestrates one page of play: presents the current section, filters
//! choices by the character's capabilities, delegates combat sections to
//! the resolver, and emits state-change events for a host UI.

/// Session configuration.
pub mod config;
/// Error types for the play session.
pub mod error;
/// State-change events for the presentation boundary.
pub mod events;
/// The play session itself.
pub mod session;
/// Navigation states.
pub mod state;

pub use config::SessionConfig;
pub use error::{EngineError, EngineResult};
pub use events::{ChoiceView, GameEvent};
pub use session::GameSession;
pub use state::{NavState, TerminalKind};
