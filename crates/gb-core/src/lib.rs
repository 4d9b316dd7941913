//! Core types for the gamebook engine: characters, books, and the
//! section graph.
//!
//! This crate defines the data model the engine operates on. It is
//! independent of any presentation or storage layer — book data arrives
//! fully parsed, and character state is pure serde-serializable data the
//! host persists however it likes.

/// Book data model: sections, choices, and combat encounters.
pub mod book;
/// The character record and its progression rules.
pub mod character;
/// Error types used throughout the crate.
pub mod error;
/// Random digit service.
pub mod rng;
/// Saved-character roster for the host's persistence layer.
pub mod roster;
/// Section graph store with load-time validation.
pub mod store;

/// Re-export book data types.
pub use book::{
    BookData, BookSection, Choice, CombatEncounter, CombatModifier, Discipline, SectionKind,
};
/// Re-export character types.
pub use character::{Character, CharacterId, ItemSlot};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export digit source types.
pub use rng::{DigitRng, FixedDigits, StdDigits};
/// Re-export the roster.
pub use roster::CharacterRoster;
/// Re-export the section store.
pub use store::SectionStore;
