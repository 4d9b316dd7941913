//! One play session: the navigation state machine over a loaded book.
//!
//! The session reads sections from the store, filters choices through the
//! character's capabilities, delegates combat sections to the resolver,
//! and queues state-change events for the host to render. It is
//! single-threaded and synchronous; the host serializes access per
//! character.

use gb_combat::{FightOutcome, FightReport, ResolveOptions, ResultsTable};
use gb_core::book::{BookSection, CombatEncounter, SectionKind};
use gb_core::character::Character;
use gb_core::rng::{DigitRng, StdDigits};
use gb_core::store::SectionStore;

use crate::config::SessionConfig;
use crate::error::{EngineError, EngineResult};
use crate::events::{ChoiceView, GameEvent};
use crate::state::{NavState, TerminalKind};

/// An interactive play session over one book.
pub struct GameSession {
    store: SectionStore,
    table: ResultsTable,
    character: Character,
    rng: Box<dyn DigitRng>,
    state: NavState,
    eligible: Vec<usize>,
    pending_encounter: Option<CombatEncounter>,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Start a session at the character's recorded position.
    pub fn new(
        store: SectionStore,
        table: ResultsTable,
        character: Character,
        config: SessionConfig,
    ) -> EngineResult<Self> {
        Self::with_rng(store, table, character, Box::new(StdDigits::seeded(config.seed)))
    }

    /// Start a session with an injected digit source, for replay and tests.
    pub fn with_rng(
        store: SectionStore,
        table: ResultsTable,
        character: Character,
        rng: Box<dyn DigitRng>,
    ) -> EngineResult<Self> {
        let mut session = Self {
            store,
            table,
            character,
            rng,
            state: NavState::Narrative,
            eligible: Vec::new(),
            pending_encounter: None,
            events: Vec::new(),
        };
        let start = session.character.current_section;
        session.enter(start)?;
        Ok(session)
    }

    /// The current navigation state.
    pub fn state(&self) -> NavState {
        self.state
    }

    /// The active character.
    pub fn character(&self) -> &Character {
        &self.character
    }

    /// Mutable access to the character for host-driven progression
    /// (item pickups, healing, discipline grants between sections).
    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    /// The section the session is currently at.
    pub fn current_section(&self) -> EngineResult<&BookSection> {
        Ok(self.store.get_section(self.character.current_section)?)
    }

    /// The currently visible choices. Empty during combat and in
    /// terminal states; ineligible choices are hidden, not disabled.
    pub fn eligible_choices(&self) -> EngineResult<Vec<ChoiceView>> {
        let section = self.current_section()?;
        Ok(choice_views(section, &self.eligible))
    }

    /// Drain all queued state-change events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Select a choice by its index into the section's full choice list.
    ///
    /// Only valid in `Narrative`/`AwaitingChoice` and only for an index
    /// in the eligible set. Advances the character and enters the target
    /// section; returns the new section number.
    pub fn choose(&mut self, index: usize) -> EngineResult<u32> {
        match self.state {
            NavState::Terminal(_) => return Err(EngineError::SessionOver),
            NavState::InCombat => return Err(EngineError::CombatPending),
            NavState::Narrative | NavState::AwaitingChoice => {}
        }
        if !self.eligible.contains(&index) {
            return Err(EngineError::InvalidChoice(index));
        }

        let target = {
            let section = self.store.get_section(self.character.current_section)?;
            section.choices[index].target
        };
        let book = self.store.book().book_number;
        self.character.advance_section(book, target);
        self.enter(target)?;
        Ok(target)
    }

    /// Resolve the current section's fight.
    ///
    /// On defeat the session routes straight to `Terminal(Defeat)`
    /// regardless of the graph's declared targets. On victory or evasion
    /// the combat section's own choices — hidden until now — become the
    /// eligible set. A stalled fight leaves the session in combat so the
    /// host may retry with a different round limit; completed-round
    /// losses stand either way.
    pub fn fight(&mut self, options: &ResolveOptions) -> EngineResult<FightReport> {
        match self.state {
            NavState::InCombat => {}
            NavState::Terminal(_) => return Err(EngineError::SessionOver),
            NavState::Narrative | NavState::AwaitingChoice => {
                return Err(EngineError::NotInCombat);
            }
        }
        let encounter = self
            .pending_encounter
            .take()
            .ok_or(EngineError::NotInCombat)?;

        let report = match gb_combat::resolve(
            &mut self.character,
            &encounter,
            &self.table,
            self.rng.as_mut(),
            options,
        ) {
            Ok(report) => report,
            Err(err) => {
                self.pending_encounter = Some(encounter);
                return Err(err.into());
            }
        };

        for record in &report.rounds {
            self.events.push(GameEvent::CombatRoundResolved {
                enemy: encounter.enemy_name.clone(),
                record: *record,
            });
        }

        match report.outcome {
            FightOutcome::Defeated => {
                self.state = NavState::Terminal(TerminalKind::Defeat);
                self.eligible.clear();
                self.events.push(GameEvent::TerminalReached {
                    kind: TerminalKind::Defeat,
                });
            }
            FightOutcome::Victorious | FightOutcome::Evaded => {
                let section = self.store.get_section(self.character.current_section)?;
                self.state = NavState::AwaitingChoice;
                self.eligible = eligible_indices(&self.character, section);
                self.events.push(GameEvent::ChoicesAvailable {
                    choices: choice_views(section, &self.eligible),
                });
            }
        }
        Ok(report)
    }

    /// Enter a section and derive the new state from its kind.
    fn enter(&mut self, number: u32) -> EngineResult<()> {
        let section = self.store.get_section(number)?;
        self.events.push(GameEvent::SectionEntered {
            number,
            kind: section.kind,
        });

        if let Some(kind) = TerminalKind::from_section(section.kind) {
            self.state = NavState::Terminal(kind);
            self.eligible.clear();
            self.pending_encounter = None;
            self.events.push(GameEvent::TerminalReached { kind });
            return Ok(());
        }

        match section.kind {
            SectionKind::Combat => {
                // Choices stay hidden until the fight is resolved.
                self.state = NavState::InCombat;
                self.eligible.clear();
                self.pending_encounter = section.combat.clone();
            }
            _ => {
                self.state = if section.kind == SectionKind::Choice {
                    NavState::AwaitingChoice
                } else {
                    NavState::Narrative
                };
                self.pending_encounter = None;
                self.eligible = eligible_indices(&self.character, section);
                self.events.push(GameEvent::ChoicesAvailable {
                    choices: choice_views(section, &self.eligible),
                });
            }
        }
        Ok(())
    }
}

/// Indices of the choices the character is allowed to see.
fn eligible_indices(character: &Character, section: &BookSection) -> Vec<usize> {
    section
        .choices
        .iter()
        .enumerate()
        .filter(|(_, choice)| {
            choice
                .requires
                .as_deref()
                .is_none_or(|req| character.has_capability(req))
        })
        .map(|(i, _)| i)
        .collect()
}

/// Presentation views for an eligible index list.
fn choice_views(section: &BookSection, eligible: &[usize]) -> Vec<ChoiceView> {
    eligible
        .iter()
        .map(|&index| {
            let choice = &section.choices[index];
            ChoiceView {
                index,
                text: choice.text.clone(),
                target: choice.target,
            }
        })
        .collect()
}
