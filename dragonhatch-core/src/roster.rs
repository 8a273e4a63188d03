use arrayvec::ArrayVec;

use crate::actor::{Actor, ActorKind};
use crate::error::RosterFull;
use crate::grid::Position;

pub const MAX_ACTORS: usize = 256;

/// Every non-player actor of a level, in spawn order. Append-only until the
/// level is rebuilt.
#[derive(Debug, Clone, Default)]
pub struct ActorRoster {
    actors: ArrayVec<Actor, MAX_ACTORS>,
}

impl ActorRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn clear(&mut self) {
        self.actors.clear();
    }

    pub fn push(&mut self, actor: Actor) -> Result<usize, RosterFull> {
        let index = self.actors.len();
        self.actors.try_push(actor).map_err(|_| RosterFull {
            capacity: MAX_ACTORS,
        })?;
        Ok(index)
    }

    pub fn get(&self, index: usize) -> Option<&Actor> {
        self.actors.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Actor> {
        self.actors.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn count_kind(&self, kind: ActorKind) -> usize {
        self.actors.iter().filter(|actor| actor.kind == kind).count()
    }

    pub fn count_dragons(&self) -> usize {
        self.actors
            .iter()
            .filter(|actor| actor.kind.is_dragon())
            .count()
    }

    /// Eggs and dragons still in play.
    pub fn hostiles_remaining(&self) -> usize {
        self.count_kind(ActorKind::Egg) + self.count_dragons()
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.actors.iter().any(|actor| actor.position == position)
    }
}
