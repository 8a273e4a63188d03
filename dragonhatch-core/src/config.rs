use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::GridSize;
use crate::section::{SECTION_HEIGHT, SECTION_WIDTH};
use crate::tile::TileRules;

/// Rule toggles that distinguish the game variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Levels are won by carrying the key to the door. When off, crushing or
    /// colliding every egg and dragon clears the level.
    pub key_and_door: bool,
    pub dragon_collisions: bool,
    pub potions: bool,
    /// Debug command that jumps to the next section.
    pub level_skip: bool,
    pub stuck_threshold: u8,
    pub hatch_base: u8,
    pub slow_radius: i32,
    pub slow_penalty: u8,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            key_and_door: true,
            dragon_collisions: true,
            potions: true,
            level_skip: true,
            stuck_threshold: 3,
            hatch_base: 6,
            slow_radius: 7,
            slow_penalty: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub eggs_min: u32,
    /// Added to the upper egg bound once per level index.
    pub eggs_per_level: u32,
    pub potions_min: u32,
    pub potions_max: u32,
    /// Consecutive rejected samples before a spawn batch gives up.
    pub retries: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            eggs_min: 6,
            eggs_per_level: 10,
            potions_min: 4,
            potions_max: 12,
            retries: 20,
        }
    }
}

impl SpawnConfig {
    pub fn egg_range(&self, level: usize) -> (u32, u32) {
        let extra = self.eggs_per_level.saturating_mul(level as u32);
        (self.eggs_min, self.eggs_min.saturating_add(extra))
    }

    pub fn potion_range(&self) -> (u32, u32) {
        (self.potions_min, self.potions_max.max(self.potions_min))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub section_width: u32,
    pub section_height: u32,
    pub start_section: usize,
    pub rules: RuleSet,
    pub spawns: SpawnConfig,
    pub tiles: TileRules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            section_width: SECTION_WIDTH,
            section_height: SECTION_HEIGHT,
            start_section: 0,
            rules: RuleSet::default(),
            spawns: SpawnConfig::default(),
            tiles: TileRules::default(),
        }
    }
}

impl GameConfig {
    pub fn size(&self) -> GridSize {
        GridSize::new(self.section_width, self.section_height)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
