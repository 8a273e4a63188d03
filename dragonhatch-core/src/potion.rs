use crate::actor::ActorKind;
use crate::config::GameConfig;
use crate::event::GameEvent;
use crate::grid::NEIGHBOURS;
use crate::level::LevelState;

impl LevelState {
    /// Splashes `potion` around the player.
    pub fn apply_potion(
        &mut self,
        potion: ActorKind,
        config: &GameConfig,
        events: &mut Vec<GameEvent>,
    ) {
        let affected = match potion {
            ActorKind::SlowPotion => self.slow_nearby_dragons(config),
            ActorKind::WallPotion => usize::from(self.raise_wall(config)),
            _ => return,
        };

        tracing::info!("Used {} ({} affected)", potion.name(), affected);
        events.push(GameEvent::PotionUsed {
            kind: potion,
            affected,
        });
    }

    fn slow_nearby_dragons(&mut self, config: &GameConfig) -> usize {
        let center = self.player.position;
        let radius_sq = config.rules.slow_radius.saturating_mul(config.rules.slow_radius);
        let mut slowed = 0;

        for index in 0..self.roster.len() {
            let Some(actor) = self.roster.get_mut(index) else {
                continue;
            };
            if actor.kind.is_dragon() && actor.position.distance_squared(center) < radius_sq {
                actor.move_cooldown = actor.move_cooldown.saturating_add(config.rules.slow_penalty);
                slowed += 1;
            }
        }

        slowed
    }

    /// Walls off the first open neighbour of the player.
    fn raise_wall(&mut self, config: &GameConfig) -> bool {
        let center = self.player.position;
        let Some(target) = NEIGHBOURS
            .iter()
            .map(|&step| center.offset(step))
            .find(|&cell| self.is_free(cell))
        else {
            return false;
        };

        self.section.set_wall(target, config.tiles.wall_tile)
    }
}
