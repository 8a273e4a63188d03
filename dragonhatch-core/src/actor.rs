use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::{Position, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Human,
    FireDragon,
    WaterDragon,
    EarthDragon,
    AirDragon,
    Egg,
    Used,
    SlowPotion,
    WallPotion,
    Key,
    Door,
}

pub const DRAGON_KINDS: [ActorKind; 4] = [
    ActorKind::FireDragon,
    ActorKind::WaterDragon,
    ActorKind::EarthDragon,
    ActorKind::AirDragon,
];

pub const POTION_KINDS: [ActorKind; 2] = [ActorKind::SlowPotion, ActorKind::WallPotion];

/// Per-kind behaviour looked up instead of matching on the kind everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindTraits {
    /// Ticks per move; `None` never moves.
    pub move_speed: Option<u8>,
    pub dragon: bool,
    pub hatches: bool,
    /// The player may step onto it and trigger an interaction.
    pub passable: bool,
    pub name: &'static str,
}

const fn traits(
    move_speed: Option<u8>,
    dragon: bool,
    hatches: bool,
    passable: bool,
    name: &'static str,
) -> KindTraits {
    KindTraits {
        move_speed,
        dragon,
        hatches,
        passable,
        name,
    }
}

impl ActorKind {
    pub const fn traits(self) -> KindTraits {
        match self {
            ActorKind::Human => traits(Some(1), false, false, false, "Human"),
            ActorKind::FireDragon => traits(Some(2), true, false, false, "Fire Dragon"),
            ActorKind::WaterDragon => traits(Some(3), true, false, false, "Water Dragon"),
            ActorKind::EarthDragon => traits(Some(3), true, false, false, "Earth Dragon"),
            ActorKind::AirDragon => traits(Some(2), true, false, false, "Air Dragon"),
            ActorKind::Egg => traits(None, false, true, true, "Egg"),
            ActorKind::Used => traits(None, false, false, true, "Used"),
            ActorKind::SlowPotion => {
                traits(None, false, false, true, "Splash Potion of Slowness")
            }
            ActorKind::WallPotion => {
                traits(None, false, false, true, "Splash Potion of Wall Making")
            }
            ActorKind::Key => traits(None, false, false, true, "Key"),
            ActorKind::Door => traits(None, false, false, true, "Door"),
        }
    }

    pub const fn move_speed(self) -> Option<u8> {
        self.traits().move_speed
    }

    pub const fn is_dragon(self) -> bool {
        self.traits().dragon
    }

    pub const fn is_passable(self) -> bool {
        self.traits().passable
    }

    pub const fn is_potion(self) -> bool {
        matches!(self, ActorKind::SlowPotion | ActorKind::WallPotion)
    }

    pub const fn name(self) -> &'static str {
        self.traits().name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub position: Position,
    /// Requested displacement for the next tick, cleared after every tick.
    pub step: Step,
    pub kind: ActorKind,
    pub move_cooldown: u8,
    /// Ticks until the egg hatches. Only eggs carry one.
    pub action_cooldown: Option<u8>,
    /// Consecutive failed moves.
    pub stuck: u8,
}

impl Actor {
    pub fn player(position: Position) -> Self {
        Self {
            position,
            step: Step::NONE,
            kind: ActorKind::Human,
            move_cooldown: 0,
            action_cooldown: None,
            stuck: 0,
        }
    }

    pub fn spawn(kind: ActorKind, position: Position, hatch_base: u8, rng: &mut Rng) -> Self {
        let action_cooldown = kind
            .traits()
            .hatches
            .then(|| hatch_base.saturating_add(rng.u8(1..=10)));

        Self {
            position,
            step: Step::NONE,
            kind,
            move_cooldown: kind.move_speed().unwrap_or(0),
            action_cooldown,
            stuck: 0,
        }
    }

    /// Turns the actor into an inert placeholder that only the player can walk over.
    pub fn retire(&mut self) {
        self.kind = ActorKind::Used;
        self.step = Step::NONE;
        self.action_cooldown = None;
    }

    /// Egg to dragon, one-shot.
    pub fn hatch(&mut self, rng: &mut Rng) -> ActorKind {
        let kind = DRAGON_KINDS[rng.usize(..DRAGON_KINDS.len())];
        self.kind = kind;
        self.move_cooldown = kind.move_speed().unwrap_or(1).saturating_sub(1);
        self.action_cooldown = None;
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_tiers_match_kinds() {
        assert_eq!(ActorKind::Human.move_speed(), Some(1));
        assert_eq!(ActorKind::FireDragon.move_speed(), Some(2));
        assert_eq!(ActorKind::AirDragon.move_speed(), Some(2));
        assert_eq!(ActorKind::WaterDragon.move_speed(), Some(3));
        assert_eq!(ActorKind::EarthDragon.move_speed(), Some(3));
        assert_eq!(ActorKind::Egg.move_speed(), None);
        assert_eq!(ActorKind::Door.move_speed(), None);
    }

    #[test]
    fn only_eggs_get_a_hatch_timer() {
        let mut rng = Rng::with_seed(3);
        let egg = Actor::spawn(ActorKind::Egg, Position::new(1, 1), 6, &mut rng);
        let timer = egg.action_cooldown.unwrap();
        assert!((7..=16).contains(&timer));

        let key = Actor::spawn(ActorKind::Key, Position::new(1, 1), 6, &mut rng);
        assert_eq!(key.action_cooldown, None);
    }

    #[test]
    fn hatching_always_yields_a_dragon() {
        let mut rng = Rng::with_seed(11);
        for _ in 0..64 {
            let mut egg = Actor::spawn(ActorKind::Egg, Position::new(0, 0), 6, &mut rng);
            let kind = egg.hatch(&mut rng);
            assert!(DRAGON_KINDS.contains(&kind));
            assert_eq!(egg.kind, kind);
            assert_eq!(egg.action_cooldown, None);
            assert_eq!(
                egg.move_cooldown,
                kind.move_speed().unwrap() - 1,
                "hatched dragons move on their speed tier"
            );
        }
    }

    #[test]
    fn retired_actors_are_passable_and_inert() {
        let mut rng = Rng::with_seed(1);
        let mut egg = Actor::spawn(ActorKind::Egg, Position::new(0, 0), 6, &mut rng);
        egg.retire();
        assert_eq!(egg.kind, ActorKind::Used);
        assert!(egg.kind.is_passable());
        assert_eq!(egg.action_cooldown, None);
    }
}
