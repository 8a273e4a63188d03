use fastrand::Rng;

use crate::actor::Actor;
use crate::grid::{Position, Step};

/// Picks the actor's next step: straight at `target` on each axis, or a
/// random wander once it has failed `stuck_threshold` moves in a row.
pub fn plan_step(actor: &mut Actor, target: Position, stuck_threshold: u8, rng: &mut Rng) {
    if actor.stuck >= stuck_threshold {
        actor.stuck = 0;
        actor.step = Step::new(rng.i32(-1..=1), rng.i32(-1..=1));
    } else {
        actor.step = Step::toward(actor.position, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorKind;

    fn dragon_at(x: i32, y: i32) -> Actor {
        let mut rng = Rng::with_seed(0);
        Actor::spawn(ActorKind::FireDragon, Position::new(x, y), 6, &mut rng)
    }

    #[test]
    fn heads_toward_the_target() {
        let mut rng = Rng::with_seed(4);
        let mut dragon = dragon_at(10, 2);
        plan_step(&mut dragon, Position::new(3, 2), 3, &mut rng);
        assert_eq!(dragon.step, Step::new(-1, 0));

        plan_step(&mut dragon, Position::new(12, 9), 3, &mut rng);
        assert_eq!(dragon.step, Step::new(1, 1));
    }

    #[test]
    fn wanders_and_resets_when_stuck() {
        let mut rng = Rng::with_seed(4);
        let mut dragon = dragon_at(10, 2);
        dragon.stuck = 3;
        plan_step(&mut dragon, Position::new(3, 2), 3, &mut rng);
        assert_eq!(dragon.stuck, 0);
        assert!((-1..=1).contains(&dragon.step.dx));
        assert!((-1..=1).contains(&dragon.step.dy));
    }

    #[test]
    fn below_threshold_keeps_chasing() {
        let mut rng = Rng::with_seed(4);
        let mut dragon = dragon_at(10, 2);
        dragon.stuck = 2;
        plan_step(&mut dragon, Position::new(10, 0), 3, &mut rng);
        assert_eq!(dragon.stuck, 2);
        assert_eq!(dragon.step, Step::new(0, -1));
    }
}
