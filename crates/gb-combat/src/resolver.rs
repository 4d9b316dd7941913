//! Round-based fight resolution.
//!
//! Each round draws one digit, looks up both sides' endurance losses in
//! the results table, and applies them simultaneously — the character
//! through its clamping mutator, the enemy on a resolver-local copy.
//! The encounter itself is never mutated, so an abandoned fight leaves
//! the character consistent with every completed round and the book data
//! untouched.

use serde::Serialize;

use gb_core::book::{CombatEncounter, CombatModifier};
use gb_core::character::Character;
use gb_core::rng::DigitRng;

use crate::error::{CombatError, CombatResult};
use crate::table::ResultsTable;

/// How a fight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FightOutcome {
    /// The enemy's endurance reached 0.
    Victorious,
    /// The character's endurance reached 0.
    Defeated,
    /// The character abandoned the fight under the evasion rule.
    Evaded,
}

impl std::fmt::Display for FightOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Victorious => write!(f, "victorious"),
            Self::Defeated => write!(f, "defeated"),
            Self::Evaded => write!(f, "evaded"),
        }
    }
}

/// A combat-skill bonus granted by one of the character's disciplines.
///
/// Itemized per discipline so encounter immunities can cancel exactly
/// the bonus they name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisciplineBonus {
    /// The discipline granting the bonus.
    pub discipline: String,
    /// Additive combat-skill adjustment.
    pub amount: i32,
}

/// Caller-supplied options for one resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Request evasion at the end of this round (1-based). The round's
    /// losses always land before the fight ends. Ignored when the
    /// encounter does not allow evasion.
    pub evade_after_round: Option<u32>,
    /// Abort with [`CombatError::Stalled`] after this many rounds.
    /// Required safety net for tables that cannot guarantee progress.
    pub max_rounds: Option<u32>,
    /// Combat-skill bonuses from the character's disciplines.
    pub discipline_bonuses: Vec<DisciplineBonus>,
}

impl ResolveOptions {
    /// Request evasion at the end of the given round.
    pub fn with_evade_after(mut self, round: u32) -> Self {
        self.evade_after_round = Some(round);
        self
    }

    /// Set a round limit.
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    /// Add a discipline combat-skill bonus.
    pub fn with_bonus(mut self, discipline: impl Into<String>, amount: i32) -> Self {
        self.discipline_bonuses.push(DisciplineBonus {
            discipline: discipline.into(),
            amount,
        });
        self
    }
}

/// What happened in one resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundRecord {
    /// Round number, 1-based.
    pub round: u32,
    /// The digit drawn this round.
    pub digit: u8,
    /// Endurance the character lost.
    pub character_loss: u32,
    /// Endurance the enemy lost.
    pub enemy_loss: u32,
    /// Character endurance after the round.
    pub character_endurance: i32,
    /// Enemy endurance after the round.
    pub enemy_endurance: i32,
}

/// The full result of one fight resolution.
#[derive(Debug, Clone, Serialize)]
pub struct FightReport {
    /// How the fight ended.
    pub outcome: FightOutcome,
    /// Total rounds played.
    pub rounds_played: u32,
    /// Total endurance the character lost.
    pub total_character_loss: u32,
    /// Total endurance the enemy lost.
    pub total_enemy_loss: u32,
    /// Round-by-round trajectory.
    pub rounds: Vec<RoundRecord>,
}

/// Compute the combat ratio for a fight.
///
/// Character skill plus surviving discipline bonuses plus any
/// `CharacterSkill` modifiers, minus enemy skill plus `EnemySkill`
/// modifiers. A bonus is dropped when the encounter carries an
/// `ImmuneTo` modifier naming its discipline (case-insensitive).
pub fn combat_ratio(
    character: &Character,
    encounter: &CombatEncounter,
    options: &ResolveOptions,
) -> i32 {
    let mut character_skill = character.combat_skill();
    let mut enemy_skill = encounter.combat_skill;

    for bonus in &options.discipline_bonuses {
        let nullified = encounter.modifiers.iter().any(|m| {
            matches!(m, CombatModifier::ImmuneTo(d) if d.eq_ignore_ascii_case(&bonus.discipline))
        });
        if !nullified {
            character_skill += bonus.amount;
        }
    }

    for modifier in &encounter.modifiers {
        match modifier {
            CombatModifier::CharacterSkill(n) => character_skill += n,
            CombatModifier::EnemySkill(n) => enemy_skill += n,
            CombatModifier::ImmuneTo(_) => {}
        }
    }

    character_skill - enemy_skill
}

/// Resolve a fight to completion.
///
/// The character's endurance is mutated round by round, never deferred,
/// so an aborted resolution (stall, host cancellation between rounds)
/// leaves state consistent with all completed rounds. The encounter is
/// read-only; its endurance is copied.
pub fn resolve(
    character: &mut Character,
    encounter: &CombatEncounter,
    table: &ResultsTable,
    rng: &mut dyn DigitRng,
    options: &ResolveOptions,
) -> CombatResult<FightReport> {
    let ratio = combat_ratio(character, encounter, options);
    let mut enemy_endurance = encounter.endurance.max(0);

    let mut rounds = Vec::new();
    let mut total_character_loss = 0u32;
    let mut total_enemy_loss = 0u32;
    let mut round = 0u32;

    // Degenerate openings: a fight that is already decided plays no rounds.
    let outcome = if character.is_defeated() {
        FightOutcome::Defeated
    } else if enemy_endurance == 0 {
        FightOutcome::Victorious
    } else {
        loop {
            if let Some(max) = options.max_rounds
                && round >= max
            {
                return Err(CombatError::Stalled { rounds: round });
            }
            round += 1;

            let digit = rng.next_digit();
            let losses = table.lookup(ratio, digit);

            // Both losses come from the same digit draw and land together.
            character.apply_endurance_delta(-(losses.character as i32));
            enemy_endurance = (enemy_endurance - losses.enemy as i32).max(0);
            total_character_loss += losses.character;
            total_enemy_loss += losses.enemy;

            rounds.push(RoundRecord {
                round,
                digit,
                character_loss: losses.character,
                enemy_loss: losses.enemy,
                character_endurance: character.current_endurance(),
                enemy_endurance,
            });

            // Defeat dominates a simultaneous double knockout.
            if character.is_defeated() {
                break FightOutcome::Defeated;
            }
            if enemy_endurance == 0 {
                break FightOutcome::Victorious;
            }
            if let Some(after) = options.evade_after_round
                && round >= after
                && encounter.can_evade
            {
                break FightOutcome::Evaded;
            }
        }
    };

    Ok(FightReport {
        outcome,
        rounds_played: round,
        total_character_loss,
        total_enemy_loss,
        rounds,
    })
}
