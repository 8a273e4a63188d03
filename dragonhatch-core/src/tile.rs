use serde::{Deserialize, Serialize};

pub type TileId = u16;

/// How a raw (1-based) tile-map value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileClass {
    Empty,
    Floor(TileId),
    Wall(TileId),
    Door,
}

const DEFAULT_FLOOR_TILES: [TileId; 23] = [
    7, 16, 17, 25, 26, 27, 28, 29, 35, 36, 37, 38, 39, 45, 46, 47, 48, 49, 50, 51, 52, 53, 59,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileRules {
    /// Tile ids walkable as floor. Ignored when `wall_from` is set.
    pub floor_tiles: Vec<TileId>,
    /// Threshold variant: ids at or above this are walls, everything below is floor.
    pub wall_from: Option<TileId>,
    /// Raw map value that marks a door spawn.
    pub door_value: u32,
    /// Tile painted by the wall-making potion.
    pub wall_tile: TileId,
}

impl Default for TileRules {
    fn default() -> Self {
        Self {
            floor_tiles: DEFAULT_FLOOR_TILES.to_vec(),
            wall_from: None,
            door_value: 2,
            wall_tile: 15,
        }
    }
}

impl TileRules {
    pub fn is_floor_tile(&self, tile: TileId) -> bool {
        match self.wall_from {
            Some(threshold) => tile < threshold,
            None => self.floor_tiles.contains(&tile),
        }
    }

    pub fn classify(&self, raw: u32) -> TileClass {
        if raw == 0 {
            return TileClass::Empty;
        }
        if raw == self.door_value {
            return TileClass::Door;
        }

        let tile = TileId::try_from(raw - 1).unwrap_or(TileId::MAX);
        if self.is_floor_tile(tile) {
            TileClass::Floor(tile)
        } else {
            TileClass::Wall(tile)
        }
    }
}
