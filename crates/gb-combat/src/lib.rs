//! Combat resolution for the gamebook engine.
//!
//! Provides the Combat Results Table (externally configured, validated at
//! load) and the deterministic round-based fight resolver. The resolver
//! owns no persistent state: it takes the character, an encounter, a
//! table, and a digit source, and returns a full fight report.

pub mod error;
pub mod resolver;
pub mod table;

pub use error::{CombatError, CombatResult};
pub use resolver::{
    DisciplineBonus, FightOutcome, FightReport, ResolveOptions, RoundRecord, combat_ratio, resolve,
};
pub use table::{LossPair, RatioBucket, ResultsTable};
