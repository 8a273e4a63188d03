use fastrand::Rng;

use crate::actor::{Actor, ActorKind, POTION_KINDS};
use crate::config::GameConfig;
use crate::event::GameEvent;
use crate::grid::Position;
use crate::roster::ActorRoster;
use crate::section::Section;
use crate::spawn::sample_free_cell;

/// Everything that lives for one attempt at a section. Rebuilt wholesale on
/// restart or advance.
#[derive(Debug, Clone)]
pub struct LevelState {
    pub section: Section,
    pub player: Actor,
    pub roster: ActorRoster,
    pub potion: Option<ActorKind>,
    pub has_key: bool,
    pub key_dropped: bool,
    pub won: bool,
}

impl LevelState {
    /// A bare level: the given section, the player, nothing else.
    pub fn new(section: Section, player_position: Position) -> Self {
        Self {
            section,
            player: Actor::player(player_position),
            roster: ActorRoster::new(),
            potion: None,
            has_key: false,
            key_dropped: false,
            won: false,
        }
    }

    pub fn build(
        template: &Section,
        level: usize,
        config: &GameConfig,
        rng: &mut Rng,
        events: &mut Vec<GameEvent>,
    ) -> Self {
        let center = template.size().center();
        let mut state = Self::new(template.clone(), center);

        let static_spawns: Vec<_> = template.static_spawns().collect();
        for (position, kind) in static_spawns {
            // No door without the key rule.
            if kind == ActorKind::Door && !config.rules.key_and_door {
                continue;
            }
            state.add_actor(kind, position, config, rng);
        }

        let (eggs_min, eggs_max) = config.spawns.egg_range(level);
        let eggs = rng.u32(eggs_min..=eggs_max);
        state.scatter(eggs, config, rng, |_| ActorKind::Egg);

        if config.rules.potions {
            let (potions_min, potions_max) = config.spawns.potion_range();
            let potions = rng.u32(potions_min..=potions_max);
            state.scatter(potions, config, rng, |rng| {
                POTION_KINDS[rng.usize(..POTION_KINDS.len())]
            });
        }

        tracing::debug!(level, actors = state.roster.len(), "level built");
        events.push(GameEvent::LevelStarted {
            level,
            key_and_door: config.rules.key_and_door,
        });
        state
    }

    pub fn is_free(&self, position: Position) -> bool {
        !self.section.is_collidable(position)
            && self.player.position != position
            && !self.roster.is_occupied(position)
    }

    /// Appends an actor, logging instead of failing once the roster is full.
    pub fn add_actor(
        &mut self,
        kind: ActorKind,
        position: Position,
        config: &GameConfig,
        rng: &mut Rng,
    ) -> Option<usize> {
        let actor = Actor::spawn(kind, position, config.rules.hatch_base, rng);
        match self.roster.push(actor) {
            Ok(index) => Some(index),
            Err(err) => {
                tracing::warn!("dropped {:?} spawn at {:?}: {}", kind, position, err);
                None
            }
        }
    }

    fn scatter<K>(&mut self, count: u32, config: &GameConfig, rng: &mut Rng, mut kind_for: K)
    where
        K: FnMut(&mut Rng) -> ActorKind,
    {
        for placed in 0..count {
            let size = self.section.size();
            let Some(position) =
                sample_free_cell(rng, size, config.spawns.retries, |p| self.is_free(p))
            else {
                tracing::debug!("no free cell after {placed} of {count} spawns");
                return;
            };
            let kind = kind_for(rng);
            if self.add_actor(kind, position, config, rng).is_none() {
                return;
            }
        }
    }
}
