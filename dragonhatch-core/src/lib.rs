pub mod actor;
pub mod chase;
pub mod config;
pub mod error;
pub mod event;
pub mod game;
pub mod grid;
pub mod level;
pub mod potion;
pub mod resolve;
pub mod roster;
pub mod section;
pub mod spawn;
pub mod tile;
pub mod tmx;

pub use actor::{Actor, ActorKind, DRAGON_KINDS, KindTraits, POTION_KINDS};
pub use config::{GameConfig, RuleSet, SpawnConfig};
pub use error::{ConfigError, GameError, MapError, RosterFull};
pub use event::{GameEvent, StepOutcome};
pub use game::{Command, Game, Phase};
pub use grid::{Direction, GridSize, NEIGHBOURS, Position, Step};
pub use level::LevelState;
pub use roster::{ActorRoster, MAX_ACTORS};
pub use section::{Cell, SECTION_HEIGHT, SECTION_WIDTH, Section};
pub use tile::{TileClass, TileId, TileRules};
pub use tmx::{load_sections, parse_sections};
