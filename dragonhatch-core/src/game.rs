use fastrand::Rng;

use crate::chase::plan_step;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::event::{GameEvent, StepOutcome};
use crate::grid::Direction;
use crate::level::LevelState;
use crate::resolve::Mover;
use crate::section::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Wait,
    Use,
    SkipLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Every section cleared; only `Use` (play again) does anything.
    Escaped,
}

pub struct Game {
    config: GameConfig,
    sections: Vec<Section>,
    level: usize,
    phase: Phase,
    state: LevelState,
    rng: Rng,
    message: String,
}

impl Game {
    pub fn new(config: GameConfig, sections: Vec<Section>) -> Result<Self, GameError> {
        Self::with_rng(config, sections, Rng::new())
    }

    pub fn with_seed(
        config: GameConfig,
        sections: Vec<Section>,
        seed: u64,
    ) -> Result<Self, GameError> {
        Self::with_rng(config, sections, Rng::with_seed(seed))
    }

    fn with_rng(config: GameConfig, sections: Vec<Section>, rng: Rng) -> Result<Self, GameError> {
        if sections.is_empty() {
            return Err(GameError::NoSections);
        }
        if config.start_section >= sections.len() {
            return Err(GameError::StartOutOfRange {
                start: config.start_section,
                count: sections.len(),
            });
        }
        if let Some(section) = sections.iter().find(|s| s.size() != config.size()) {
            return Err(GameError::SizeMismatch {
                expected: config.size(),
                found: section.size(),
            });
        }

        let level = config.start_section;
        let state = LevelState::new(sections[level].clone(), sections[level].size().center());
        let mut game = Self {
            config,
            sections,
            level,
            phase: Phase::Playing,
            state,
            rng,
            message: String::new(),
        };

        let mut events = Vec::new();
        game.restart_level(&mut events);
        game.record(&events);
        Ok(game)
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &LevelState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut LevelState {
        &mut self.state
    }

    /// Status line: the most recent event.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Applies one player command and, if the player acted, ticks every
    /// other actor once in roster order.
    pub fn step(&mut self, command: Command) -> StepOutcome {
        let mut outcome = StepOutcome::default();

        if self.phase == Phase::Escaped {
            if command == Command::Use {
                self.level = self.config.start_section;
                self.phase = Phase::Playing;
                self.restart_level(&mut outcome.events);
            }
            self.record(&outcome.events);
            return outcome;
        }

        let waited = match command {
            Command::SkipLevel => {
                if self.config.rules.level_skip {
                    self.advance_level(&mut outcome.events);
                }
                self.record(&outcome.events);
                return outcome;
            }
            Command::Move(direction) => {
                self.state.player.step = direction.step();
                false
            }
            Command::Wait => true,
            Command::Use => {
                let Some(potion) = self.state.potion.take() else {
                    return outcome;
                };
                self.state
                    .apply_potion(potion, &self.config, &mut outcome.events);
                true
            }
        };

        let moved = self.state.tick(
            Mover::Player,
            &self.config,
            &mut self.rng,
            &mut outcome.events,
        );

        if moved || waited {
            outcome.ticked = true;
            if self.tick_roster(&mut outcome.events) {
                self.record(&outcome.events);
                return outcome;
            }
        }

        let cleared = self.state.won
            || (!self.config.rules.key_and_door && self.state.roster.hostiles_remaining() == 0);
        if cleared {
            self.advance_level(&mut outcome.events);
        }

        self.record(&outcome.events);
        outcome
    }

    /// Returns true when the player was caught and the level restarted.
    fn tick_roster(&mut self, events: &mut Vec<GameEvent>) -> bool {
        let target = self.state.player.position;
        let threshold = self.config.rules.stuck_threshold;

        let mut index = 0;
        while index < self.state.roster.len() {
            if let Some(actor) = self.state.roster.get_mut(index) {
                plan_step(actor, target, threshold, &mut self.rng);
            }
            self.state
                .tick(Mover::Roster(index), &self.config, &mut self.rng, events);

            if let Some(actor) = self.state.roster.get(index) {
                if actor.kind.is_dragon() && actor.position == self.state.player.position {
                    let by = actor.kind;
                    tracing::info!("caught by a {} on level {}", by.name(), self.level);
                    events.push(GameEvent::Caught { by });
                    self.restart_level(events);
                    return true;
                }
            }
            index += 1;
        }

        false
    }

    pub fn restart_level(&mut self, events: &mut Vec<GameEvent>) {
        self.state = LevelState::build(
            &self.sections[self.level],
            self.level,
            &self.config,
            &mut self.rng,
            events,
        );
    }

    pub fn advance_level(&mut self, events: &mut Vec<GameEvent>) {
        tracing::info!("level {} cleared", self.level);
        events.push(GameEvent::LevelCleared { level: self.level });
        self.level += 1;

        if self.level >= self.sections.len() {
            tracing::info!("escaped after {} sections", self.sections.len());
            self.phase = Phase::Escaped;
            events.push(GameEvent::Escaped);
            return;
        }

        self.restart_level(events);
    }

    fn record(&mut self, events: &[GameEvent]) {
        if let Some(last) = events.last() {
            self.message = last.to_string();
        }
    }
}
