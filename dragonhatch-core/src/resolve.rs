use fastrand::Rng;

use crate::actor::{Actor, ActorKind};
use crate::config::GameConfig;
use crate::event::GameEvent;
use crate::grid::{Position, Step};
use crate::level::LevelState;

/// Which actor a tick is resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mover {
    Player,
    Roster(usize),
}

impl LevelState {
    pub fn actor(&self, mover: Mover) -> Option<&Actor> {
        match mover {
            Mover::Player => Some(&self.player),
            Mover::Roster(index) => self.roster.get(index),
        }
    }

    /// Advances one actor by a tick: applies its pending step if its cooldown
    /// allows, runs overlap interactions, counts down its hatch timer and
    /// clears the step. Returns whether the actor moved.
    pub fn tick(
        &mut self,
        mover: Mover,
        config: &GameConfig,
        rng: &mut Rng,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        let Some(&current) = self.actor(mover) else {
            return false;
        };
        let mut actor = current;

        let mut moved = false;
        if actor.move_cooldown > 0 {
            actor.move_cooldown -= 1;
        } else if actor.kind.move_speed().is_some() {
            let target = actor.position.offset(actor.step);
            let allowed = self.terrain_allows(actor.position, actor.step)
                && self.resolve_overlaps(mover, &mut actor, target, config, rng, events);

            if allowed {
                actor.position = target;
                actor.move_cooldown = actor.kind.move_speed().unwrap_or(1) - 1;
                actor.stuck = 0;
                moved = true;
            } else {
                actor.stuck = actor.stuck.saturating_add(1);
            }
        }

        match actor.action_cooldown {
            Some(0) if actor.kind == ActorKind::Egg => {
                let kind = actor.hatch(rng);
                tracing::info!("A {} has hatched at {:?}", kind.name(), actor.position);
                events.push(GameEvent::Hatched {
                    kind,
                    at: actor.position,
                });
            }
            Some(remaining) => actor.action_cooldown = Some(remaining.saturating_sub(1)),
            None => {}
        }

        actor.step = Step::NONE;
        self.store(mover, actor);
        moved
    }

    /// Bounds, walls and corner cutting. A diagonal step needs both
    /// orthogonal neighbours open as well as the destination.
    pub fn terrain_allows(&self, from: Position, step: Step) -> bool {
        let target = from.offset(step);
        if !self.section.contains(target) || self.section.is_collidable(target) {
            return false;
        }

        if step.is_diagonal() {
            let horizontal = from.offset(Step::new(step.dx, 0));
            let vertical = from.offset(Step::new(0, step.dy));
            if self.section.is_collidable(horizontal) || self.section.is_collidable(vertical) {
                return false;
            }
        }

        true
    }

    fn resolve_overlaps(
        &mut self,
        mover: Mover,
        actor: &mut Actor,
        target: Position,
        config: &GameConfig,
        rng: &mut Rng,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        let is_player = mover == Mover::Player;
        let mut allowed = true;

        // Key drops append while we walk; they are visited too.
        let mut index = 0;
        while index < self.roster.len() {
            if mover == Mover::Roster(index) {
                index += 1;
                continue;
            }
            let Some(&other) = self.roster.get(index) else {
                break;
            };
            if other.position != target {
                index += 1;
                continue;
            }

            if config.rules.dragon_collisions && actor.kind.is_dragon() && other.kind.is_dragon() {
                actor.retire();
                self.retire(index);
                tracing::info!("Two dragons have collided at {:?}", target);
                events.push(GameEvent::DragonsCollided { at: target });
                self.roll_key_drop(actor.position, config, rng, events);
                self.roll_key_drop(other.position, config, rng, events);
            } else if is_player && other.kind.is_passable() {
                allowed &= self.interact(index, other.kind, target, config, rng, events);
            } else {
                allowed = false;
            }
            index += 1;
        }

        allowed
    }

    /// Player stepping onto a passable actor. Returns whether the player may
    /// enter the cell.
    fn interact(
        &mut self,
        index: usize,
        kind: ActorKind,
        target: Position,
        config: &GameConfig,
        rng: &mut Rng,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        match kind {
            ActorKind::Egg => {
                self.retire(index);
                tracing::info!("An Egg was crushed at {:?}", target);
                events.push(GameEvent::EggCrushed { at: target });
                self.roll_key_drop(target, config, rng, events);
                true
            }
            ActorKind::SlowPotion | ActorKind::WallPotion => {
                if self.potion.is_none() {
                    self.potion = Some(kind);
                    self.retire(index);
                    tracing::info!("Picked up {}", kind.name());
                    events.push(GameEvent::PotionPickedUp { kind });
                }
                true
            }
            ActorKind::Key => {
                self.retire(index);
                self.has_key = true;
                tracing::info!("Picked up the key");
                events.push(GameEvent::KeyPickedUp);
                true
            }
            ActorKind::Door => {
                if self.has_key {
                    self.won = true;
                } else {
                    events.push(GameEvent::DoorLocked);
                }
                false
            }
            _ => true,
        }
    }

    /// Drops the level's only key at `at` with probability one in (eggs +
    /// dragons still in play).
    pub fn roll_key_drop(
        &mut self,
        at: Position,
        config: &GameConfig,
        rng: &mut Rng,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if self.key_dropped || !config.rules.key_and_door {
            return false;
        }

        let chance = self.roster.hostiles_remaining().max(1);
        if rng.usize(1..=chance) != 1 {
            return false;
        }

        if self.add_actor(ActorKind::Key, at, config, rng).is_none() {
            return false;
        }
        self.key_dropped = true;
        tracing::info!("A key was dropped at {:?}", at);
        events.push(GameEvent::KeyDropped { at });
        true
    }

    fn retire(&mut self, index: usize) {
        if let Some(other) = self.roster.get_mut(index) {
            other.retire();
        }
    }

    fn store(&mut self, mover: Mover, actor: Actor) {
        match mover {
            Mover::Player => self.player = actor,
            Mover::Roster(index) => {
                if let Some(slot) = self.roster.get_mut(index) {
                    *slot = actor;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::DRAGON_KINDS;
    use crate::grid::{Direction, GridSize};
    use crate::section::Section;

    fn open_level() -> LevelState {
        let section = Section::arena(GridSize::new(10, 6), 7, 0);
        LevelState::new(section, Position::new(4, 3))
    }

    fn place(state: &mut LevelState, kind: ActorKind, x: i32, y: i32) -> usize {
        let mut rng = Rng::with_seed(0);
        let mut actor = Actor::spawn(kind, Position::new(x, y), 6, &mut rng);
        actor.move_cooldown = 0;
        state.roster.push(actor).unwrap()
    }

    fn walk(state: &mut LevelState, direction: Direction) -> (bool, Vec<GameEvent>) {
        let config = GameConfig::default();
        let mut rng = Rng::with_seed(1);
        let mut events = Vec::new();
        state.player.step = direction.step();
        let moved = state.tick(Mover::Player, &config, &mut rng, &mut events);
        (moved, events)
    }

    #[test]
    fn walls_and_bounds_block_and_count_as_stuck() {
        let mut state = open_level();
        let dragon = place(&mut state, ActorKind::FireDragon, 1, 1);
        let config = GameConfig::default();
        let mut rng = Rng::with_seed(1);

        for expected_stuck in 1..=3 {
            state.roster.get_mut(dragon).unwrap().step = Step::new(-1, -1);
            assert!(!state.tick(Mover::Roster(dragon), &config, &mut rng, &mut Vec::new()));
            let actor = state.roster.get(dragon).unwrap();
            assert_eq!(actor.position, Position::new(1, 1));
            assert_eq!(actor.stuck, expected_stuck);
            assert_eq!(actor.step, Step::NONE);
        }
    }

    #[test]
    fn moves_stay_in_bounds_without_walls() {
        let section = Section::new(
            GridSize::new(3, 2),
            vec![crate::section::Cell::default(); 6],
        )
        .unwrap();
        let mut state = LevelState::new(section, Position::new(2, 1));
        let config = GameConfig::default();
        let mut rng = Rng::with_seed(1);

        for step in crate::grid::NEIGHBOURS {
            state.player.step = step;
            state.tick(Mover::Player, &config, &mut rng, &mut Vec::new());
            assert!(state.section.contains(state.player.position));
        }
    }

    #[test]
    fn diagonal_cannot_cut_corners() {
        let mut state = open_level();
        state.section.set_wall(Position::new(5, 3), 0);
        state.player.step = Step::new(1, -1);
        let config = GameConfig::default();
        let mut rng = Rng::with_seed(1);

        assert!(!state.tick(Mover::Player, &config, &mut rng, &mut Vec::new()));
        assert_eq!(state.player.position, Position::new(4, 3));

        state.player.step = Step::new(-1, -1);
        assert!(state.tick(Mover::Player, &config, &mut rng, &mut Vec::new()));
        assert_eq!(state.player.position, Position::new(3, 2));
    }

    #[test]
    fn cooldown_throttles_movement_by_speed_tier() {
        let mut state = open_level();
        let dragon = place(&mut state, ActorKind::WaterDragon, 1, 1);
        let config = GameConfig::default();
        let mut rng = Rng::with_seed(1);

        let mut moves = 0;
        for _ in 0..9 {
            state.roster.get_mut(dragon).unwrap().step = Step::new(1, 0);
            if state.tick(Mover::Roster(dragon), &config, &mut rng, &mut Vec::new()) {
                moves += 1;
            }
        }
        assert_eq!(moves, 3);
    }

    #[test]
    fn colliding_dragons_both_become_used() {
        let mut state = open_level();
        let fire = place(&mut state, ActorKind::FireDragon, 1, 1);
        let water = place(&mut state, ActorKind::WaterDragon, 2, 1);
        let config = GameConfig::default();
        let mut rng = Rng::with_seed(1);
        let mut events = Vec::new();

        state.roster.get_mut(fire).unwrap().step = Step::new(1, 0);
        state.tick(Mover::Roster(fire), &config, &mut rng, &mut events);

        assert_eq!(state.roster.get(fire).unwrap().kind, ActorKind::Used);
        assert_eq!(state.roster.get(water).unwrap().kind, ActorKind::Used);
        assert!(events.contains(&GameEvent::DragonsCollided {
            at: Position::new(2, 1)
        }));
        // No hostiles remain, so the key is a certainty.
        assert!(state.key_dropped);
        assert_eq!(state.roster.count_kind(ActorKind::Key), 1);
    }

    #[test]
    fn dragons_block_each_other_when_collisions_are_off() {
        let mut state = open_level();
        let fire = place(&mut state, ActorKind::FireDragon, 1, 1);
        place(&mut state, ActorKind::WaterDragon, 2, 1);
        let mut config = GameConfig::default();
        config.rules.dragon_collisions = false;
        let mut rng = Rng::with_seed(1);

        state.roster.get_mut(fire).unwrap().step = Step::new(1, 0);
        assert!(!state.tick(Mover::Roster(fire), &config, &mut rng, &mut Vec::new()));
        assert_eq!(state.roster.count_dragons(), 2);
    }

    #[test]
    fn key_drops_at_most_once() {
        let mut state = open_level();
        let config = GameConfig::default();
        let mut rng = Rng::with_seed(1);
        let mut events = Vec::new();

        for _ in 0..10 {
            state.roll_key_drop(Position::new(2, 2), &config, &mut rng, &mut events);
        }
        assert_eq!(state.roster.count_kind(ActorKind::Key), 1);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::KeyDropped { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn player_crushes_eggs() {
        let mut state = open_level();
        let egg = place(&mut state, ActorKind::Egg, 5, 3);
        place(&mut state, ActorKind::Egg, 8, 4);

        let (moved, events) = walk(&mut state, Direction::Right);
        assert!(moved);
        assert_eq!(state.player.position, Position::new(5, 3));
        assert_eq!(state.roster.get(egg).unwrap().kind, ActorKind::Used);
        assert_eq!(events[0], GameEvent::EggCrushed { at: Position::new(5, 3) });
    }

    #[test]
    fn player_holds_only_one_potion() {
        let mut state = open_level();
        let slow = place(&mut state, ActorKind::SlowPotion, 5, 3);
        let wall = place(&mut state, ActorKind::WallPotion, 6, 3);

        walk(&mut state, Direction::Right);
        let (moved, events) = walk(&mut state, Direction::Right);

        assert!(moved);
        assert_eq!(state.potion, Some(ActorKind::SlowPotion));
        assert_eq!(state.roster.get(slow).unwrap().kind, ActorKind::Used);
        assert_eq!(state.roster.get(wall).unwrap().kind, ActorKind::WallPotion);
        assert!(events.is_empty());
    }

    #[test]
    fn player_cannot_walk_into_dragons() {
        let mut state = open_level();
        place(&mut state, ActorKind::EarthDragon, 5, 3);
        let (moved, _) = walk(&mut state, Direction::Right);
        assert!(!moved);
        assert_eq!(state.player.position, Position::new(4, 3));
    }

    #[test]
    fn locked_door_blocks_without_key() {
        let mut state = open_level();
        place(&mut state, ActorKind::Door, 5, 3);

        let (moved, events) = walk(&mut state, Direction::Right);
        assert!(!moved);
        assert!(!state.won);
        assert_eq!(events, vec![GameEvent::DoorLocked]);
    }

    #[test]
    fn door_with_key_wins() {
        let mut state = open_level();
        place(&mut state, ActorKind::Key, 4, 2);
        place(&mut state, ActorKind::Door, 5, 2);

        let (moved, events) = walk(&mut state, Direction::Up);
        assert!(moved);
        assert!(state.has_key);
        assert_eq!(events, vec![GameEvent::KeyPickedUp]);

        let (moved, _) = walk(&mut state, Direction::Right);
        assert!(!moved);
        assert!(state.won);
        assert_eq!(state.player.position, Position::new(4, 2));
    }

    #[test]
    fn eggs_hatch_when_the_timer_runs_out() {
        let mut state = open_level();
        let egg = place(&mut state, ActorKind::Egg, 2, 2);
        state.roster.get_mut(egg).unwrap().action_cooldown = Some(1);
        let config = GameConfig::default();
        let mut rng = Rng::with_seed(1);
        let mut events = Vec::new();

        state.tick(Mover::Roster(egg), &config, &mut rng, &mut events);
        assert_eq!(state.roster.get(egg).unwrap().kind, ActorKind::Egg);

        state.tick(Mover::Roster(egg), &config, &mut rng, &mut events);
        let hatched = state.roster.get(egg).unwrap();
        assert!(DRAGON_KINDS.contains(&hatched.kind));
        assert_eq!(hatched.position, Position::new(2, 2));
        assert!(matches!(events.as_slice(), [GameEvent::Hatched { .. }]));
    }

    #[test]
    fn non_players_are_blocked_by_any_actor() {
        let mut state = open_level();
        let dragon = place(&mut state, ActorKind::AirDragon, 1, 1);
        place(&mut state, ActorKind::Egg, 2, 1);
        let config = GameConfig::default();
        let mut rng = Rng::with_seed(1);

        state.roster.get_mut(dragon).unwrap().step = Step::new(1, 0);
        assert!(!state.tick(Mover::Roster(dragon), &config, &mut rng, &mut Vec::new()));
        assert_eq!(state.roster.count_kind(ActorKind::Egg), 1);
    }
}
