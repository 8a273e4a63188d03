use std::fmt;

use crate::actor::ActorKind;
use crate::grid::Position;

/// Something noteworthy that happened during a step, in order of occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    LevelStarted { level: usize, key_and_door: bool },
    EggCrushed { at: Position },
    PotionPickedUp { kind: ActorKind },
    KeyPickedUp,
    DoorLocked,
    KeyDropped { at: Position },
    DragonsCollided { at: Position },
    Hatched { kind: ActorKind, at: Position },
    PotionUsed { kind: ActorKind, affected: usize },
    Caught { by: ActorKind },
    LevelCleared { level: usize },
    Escaped,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::LevelStarted {
                key_and_door: true, ..
            } => f.write_str("You're surrounded by Dragon Eggs. Find the Key and Escape!"),
            GameEvent::LevelStarted { .. } => {
                f.write_str("You're surrounded by Dragon Eggs. Crush them before they hatch!")
            }
            GameEvent::EggCrushed { .. } => f.write_str("An Egg was crushed"),
            GameEvent::PotionPickedUp { kind } => write!(f, "Picked up {}", kind.name()),
            GameEvent::KeyPickedUp => f.write_str("Picked up the Key"),
            GameEvent::DoorLocked => f.write_str("The door is locked"),
            GameEvent::KeyDropped { .. } => f.write_str("A key was dropped"),
            GameEvent::DragonsCollided { .. } => f.write_str("Two dragons have collided"),
            GameEvent::Hatched { kind, .. } => write!(f, "A {} has hatched!", kind.name()),
            GameEvent::PotionUsed {
                kind: ActorKind::SlowPotion,
                affected,
            } => write!(
                f,
                "Used Splash Potion of Slowness. {affected} Dragons Slowed."
            ),
            GameEvent::PotionUsed { kind, .. } => write!(f, "Used {}", kind.name()),
            GameEvent::Caught { by } => write!(f, "Caught by a {}!", by.name()),
            GameEvent::LevelCleared { .. } => f.write_str("Win!"),
            GameEvent::Escaped => f.write_str("Well done you escaped!"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Whether the world advanced by a tick.
    pub ticked: bool,
    pub events: Vec<GameEvent>,
}

impl StepOutcome {
    pub fn contains(&self, predicate: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.iter().any(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_actor_kind() {
        let hatched = GameEvent::Hatched {
            kind: ActorKind::FireDragon,
            at: Position::new(0, 0),
        };
        assert_eq!(hatched.to_string(), "A Fire Dragon has hatched!");

        let slowed = GameEvent::PotionUsed {
            kind: ActorKind::SlowPotion,
            affected: 3,
        };
        assert_eq!(
            slowed.to_string(),
            "Used Splash Potion of Slowness. 3 Dragons Slowed."
        );
    }
}
