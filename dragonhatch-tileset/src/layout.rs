use dragonhatch_core::ActorKind;

pub const TILE_PIXEL_SIZE: u32 = 16;
pub const TILESET_COLUMNS: u32 = 10;
pub const TILESET_ROWS: u32 = 24;
pub const TILESET_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TilePosition {
    pub tile_x: u32,
    pub tile_y: u32,
}

pub const fn tile_count() -> u32 {
    TILESET_COLUMNS * TILESET_ROWS
}

pub const fn atlas_pixel_size() -> (u32, u32) {
    (
        TILESET_COLUMNS * TILE_PIXEL_SIZE,
        TILESET_ROWS * TILE_PIXEL_SIZE,
    )
}

pub fn tile_position_for_index(tile_index: u32) -> TilePosition {
    let tile_x = tile_index % TILESET_COLUMNS;
    let tile_y = tile_index / TILESET_COLUMNS;
    TilePosition { tile_x, tile_y }
}

pub fn tile_pixel_position(tile_index: u32) -> (u32, u32) {
    let pos = tile_position_for_index(tile_index);
    (pos.tile_x * TILE_PIXEL_SIZE, pos.tile_y * TILE_PIXEL_SIZE)
}

/// Atlas cell holding the sprite for `kind`. Used placeholders are not drawn.
pub fn sprite_index(kind: ActorKind) -> Option<u32> {
    let index = match kind {
        ActorKind::Human => 190,
        ActorKind::FireDragon => 221,
        ActorKind::WaterDragon => 228,
        ActorKind::EarthDragon => 229,
        ActorKind::AirDragon => 212,
        ActorKind::Egg => 173,
        ActorKind::SlowPotion => 97,
        ActorKind::WallPotion => 98,
        ActorKind::Key => 80,
        ActorKind::Door => 2,
        ActorKind::Used => return None,
    };
    Some(index)
}

pub const SPRITE_KINDS: [ActorKind; 10] = [
    ActorKind::Human,
    ActorKind::FireDragon,
    ActorKind::WaterDragon,
    ActorKind::EarthDragon,
    ActorKind::AirDragon,
    ActorKind::Egg,
    ActorKind::SlowPotion,
    ActorKind::WallPotion,
    ActorKind::Key,
    ActorKind::Door,
];

pub fn sprite_kind_at(tile_index: u32) -> Option<ActorKind> {
    SPRITE_KINDS
        .iter()
        .copied()
        .find(|&kind| sprite_index(kind) == Some(tile_index))
}

/// Tileset used for the terrain of `level`.
pub fn terrain_tileset(level: usize) -> usize {
    level % TILESET_COUNT
}

/// Tileset used for the sprite of `kind` on `level`. Doors share the terrain
/// sheet; everything else comes from the next one.
pub fn sprite_tileset(kind: ActorKind, level: usize) -> usize {
    match kind {
        ActorKind::Door => terrain_tileset(level),
        _ => (level + 1) % TILESET_COUNT,
    }
}

pub fn tileset_file_name(tileset: usize) -> String {
    format!("tileset{}.png", tileset + 1)
}
