use dragonhatch_core::{
    Actor, ActorKind, Cell, Game, GameConfig, GridSize, Phase, Position, Section, TileId,
    parse_sections,
};
use dragonhatch_tileset::layout;
#[cfg(target_arch = "wasm32")]
use macroquad::miniquad;
use macroquad::prelude::*;

mod input;

use crate::input::KeyAction;

const SECTIONS_PATH: &str = "assets/sections.tmx";
const CONFIG_PATH: &str = "assets/config.json";
const TILE_PIXEL_SIZE: f32 = layout::TILE_PIXEL_SIZE as f32;
const STATUS_LINE_HEIGHT: f32 = 48.0;
const STATUS_FONT_SIZE: f32 = 28.0;
const OVERLAY_FONT_SIZE: f32 = 40.0;
const ANIMATION_FRAME_SECONDS: f32 = 0.4;
const FALLBACK_FLOOR_TILE: TileId = 7;

/// Flat colours used when a tileset image is missing.
struct TilePalette;

impl TilePalette {
    fn terrain_color(&self, cell: &Cell) -> Option<Color> {
        if cell.solid.is_some() {
            Some(Color::from_rgba(120, 120, 120, 255))
        } else if cell.floor.is_some() {
            Some(Color::from_rgba(86, 70, 52, 255))
        } else {
            None
        }
    }

    fn sprite_color(&self, kind: ActorKind) -> Color {
        match kind {
            ActorKind::Human => Color::from_rgba(235, 215, 170, 255),
            ActorKind::FireDragon => Color::from_rgba(220, 60, 30, 255),
            ActorKind::WaterDragon => Color::from_rgba(40, 110, 220, 255),
            ActorKind::EarthDragon => Color::from_rgba(110, 160, 50, 255),
            ActorKind::AirDragon => Color::from_rgba(200, 220, 240, 255),
            ActorKind::Egg => Color::from_rgba(240, 235, 200, 255),
            ActorKind::SlowPotion => Color::from_rgba(120, 80, 200, 255),
            ActorKind::WallPotion => Color::from_rgba(200, 160, 40, 255),
            ActorKind::Key => Color::from_rgba(250, 210, 40, 255),
            ActorKind::Door => Color::from_rgba(110, 70, 30, 255),
            ActorKind::Used => Color::from_rgba(0, 0, 0, 0),
        }
    }
}

struct TileSets {
    textures: Vec<Option<Texture2D>>,
}

impl TileSets {
    async fn load_from_assets() -> Self {
        let mut textures = Vec::with_capacity(layout::TILESET_COUNT);
        for tileset in 0..layout::TILESET_COUNT {
            let path = format!("assets/{}", layout::tileset_file_name(tileset));
            match load_texture(&path).await {
                Ok(texture) => {
                    texture.set_filter(FilterMode::Nearest);
                    textures.push(Some(texture));
                }
                Err(err) => {
                    tracing::warn!("failed to load tileset at {path}: {err}; using flat colours");
                    textures.push(None);
                }
            }
        }
        Self { textures }
    }

    fn get(&self, tileset: usize) -> Option<&Texture2D> {
        self.textures.get(tileset).and_then(Option::as_ref)
    }
}

fn tile_source_rect(tile_index: u32) -> Option<Rect> {
    if tile_index >= layout::tile_count() {
        return None;
    }
    let (x, y) = layout::tile_pixel_position(tile_index);
    Some(Rect::new(x as f32, y as f32, TILE_PIXEL_SIZE, TILE_PIXEL_SIZE))
}

/// Largest scale at which the section and the status line fit the screen.
fn board_scale(screen_w: f32, screen_h: f32, size: GridSize) -> f32 {
    let board_w = size.width as f32 * TILE_PIXEL_SIZE;
    let board_h = size.height as f32 * TILE_PIXEL_SIZE;
    let fit = (screen_w / board_w).min((screen_h - STATUS_LINE_HEIGHT) / board_h);
    fit.max(0.25)
}

fn fallback_section(config: &GameConfig) -> Section {
    let size = config.size();
    let mut section = Section::arena(size, FALLBACK_FLOOR_TILE, config.tiles.wall_tile);
    let door = Position::new(size.width as i32 - 2, 1);
    section.set_spawn(door, Some(ActorKind::Door));
    section
}

async fn load_config() -> GameConfig {
    let text = match load_string(CONFIG_PATH).await {
        Ok(text) => text,
        Err(err) => {
            tracing::info!("no config at {CONFIG_PATH} ({err}); using defaults");
            return GameConfig::default();
        }
    };

    GameConfig::from_json_str(&text).unwrap_or_else(|err| {
        tracing::error!("invalid config at {CONFIG_PATH}: {err}; using defaults");
        GameConfig::default()
    })
}

async fn load_level_sections(config: &GameConfig) -> Vec<Section> {
    let parsed = match load_string(SECTIONS_PATH).await {
        Ok(text) => {
            parse_sections(&text, config.size(), &config.tiles).map_err(|err| err.to_string())
        }
        Err(err) => Err(err.to_string()),
    };

    match parsed {
        Ok(sections) => {
            tracing::info!("loaded {} sections from {SECTIONS_PATH}", sections.len());
            sections
        }
        Err(err) => {
            tracing::error!("failed to load {SECTIONS_PATH}: {err}; using a fallback arena");
            vec![fallback_section(config)]
        }
    }
}

fn build_game(config: GameConfig, sections: Vec<Section>) -> Game {
    Game::new(config.clone(), sections).unwrap_or_else(move |err| {
        tracing::error!("cannot start game: {err}; using a fallback arena");
        let config = GameConfig {
            start_section: 0,
            ..config
        };
        let arena = fallback_section(&config);
        Game::new(config, vec![arena]).expect("fallback arena matches the configured size")
    })
}

struct GameState {
    game: Game,
    tilesets: TileSets,
    palette: TilePalette,
    animation_timer: f32,
    bob: bool,
}

impl GameState {
    async fn new() -> Self {
        let config = load_config().await;
        let sections = load_level_sections(&config).await;
        let game = build_game(config, sections);
        let tilesets = TileSets::load_from_assets().await;

        Self {
            game,
            tilesets,
            palette: TilePalette,
            animation_timer: 0.0,
            bob: false,
        }
    }

    /// Returns false once the player asked to quit.
    fn update(&mut self, delta_seconds: f32) -> bool {
        self.animation_timer += delta_seconds;
        while self.animation_timer >= ANIMATION_FRAME_SECONDS {
            self.animation_timer -= ANIMATION_FRAME_SECONDS;
            self.bob = !self.bob;
        }

        match input::poll() {
            KeyAction::Quit => return false,
            KeyAction::Submit(command) => {
                let outcome = self.game.step(command);
                for event in &outcome.events {
                    tracing::debug!(?event, "{event}");
                }
            }
            KeyAction::None => {}
        }

        true
    }

    fn render(&self) {
        clear_background(BLACK);

        if self.game.phase() == Phase::Escaped {
            self.render_escaped();
            return;
        }

        let size = self.game.state().section.size();
        let scale = board_scale(screen_width(), screen_height(), size);
        let tile = TILE_PIXEL_SIZE * scale;

        self.render_section(tile);
        self.render_actors(tile);
        self.render_held_items(tile);

        let status_y = size.height as f32 * tile + STATUS_LINE_HEIGHT * 0.66;
        draw_text(
            &format!("> {}", self.game.message()),
            8.0,
            status_y,
            STATUS_FONT_SIZE,
            WHITE,
        );
    }

    fn render_section(&self, tile: f32) {
        let section = &self.game.state().section;
        let texture = self.tilesets.get(layout::terrain_tileset(self.game.level()));
        let size = section.size();

        for (index, cell) in section.cells().iter().enumerate() {
            let position = size.position(index);
            let dest = vec2(position.x as f32 * tile, position.y as f32 * tile);
            let source = cell.visual_tile().and_then(|id| tile_source_rect(u32::from(id)));

            match (texture, source) {
                (Some(texture), Some(source)) => draw_tile(texture, source, dest, tile),
                _ => {
                    if let Some(color) = self.palette.terrain_color(cell) {
                        draw_rectangle(dest.x, dest.y, tile, tile, color);
                    }
                }
            }
        }
    }

    fn render_actors(&self, tile: f32) {
        let state = self.game.state();
        let bob = tile / TILE_PIXEL_SIZE;

        for actor in state.roster.iter() {
            let lift = if self.bob && actor.kind.is_dragon() {
                bob
            } else {
                0.0
            };
            self.draw_actor(actor, tile, lift);
        }
        self.draw_actor(&state.player, tile, 0.0);
    }

    fn draw_actor(&self, actor: &Actor, tile: f32, lift: f32) {
        let dest = vec2(
            actor.position.x as f32 * tile,
            actor.position.y as f32 * tile - lift,
        );
        self.draw_sprite(actor.kind, dest, tile);
    }

    fn draw_sprite(&self, kind: ActorKind, dest: Vec2, tile: f32) {
        let Some(index) = layout::sprite_index(kind) else {
            return;
        };
        let tileset = layout::sprite_tileset(kind, self.game.level());

        match (self.tilesets.get(tileset), tile_source_rect(index)) {
            (Some(texture), Some(source)) => draw_tile(texture, source, dest, tile),
            _ => {
                let radius = tile * 0.4;
                let center = dest + vec2(tile * 0.5, tile * 0.5);
                draw_circle(center.x, center.y, radius, self.palette.sprite_color(kind));
            }
        }
    }

    /// Held potion and key sit over the top-left corner of the board.
    fn render_held_items(&self, tile: f32) {
        let state = self.game.state();
        if let Some(potion) = state.potion {
            self.draw_sprite(potion, vec2(0.0, 0.0), tile);
        }
        if state.has_key {
            self.draw_sprite(ActorKind::Key, vec2(tile, 0.0), tile);
        }
    }

    fn render_escaped(&self) {
        let lines = ["Well done you escaped!", "Press <USE> to play again"];
        let mut y = screen_height() * 0.5 - OVERLAY_FONT_SIZE;

        for line in lines {
            let dims = measure_text(line, None, OVERLAY_FONT_SIZE as u16, 1.0);
            draw_text(
                line,
                (screen_width() - dims.width) * 0.5,
                y,
                OVERLAY_FONT_SIZE,
                WHITE,
            );
            y += OVERLAY_FONT_SIZE * 1.5;
        }
    }
}

fn draw_tile(texture: &Texture2D, source: Rect, dest: Vec2, tile: f32) {
    draw_texture_ex(
        texture,
        dest.x,
        dest.y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(tile, tile)),
            source: Some(source),
            ..Default::default()
        },
    );
}

pub async fn run() {
    install_panic_hook();
    init_logging();

    let mut game = GameState::new().await;

    loop {
        if !game.update(get_frame_time()) {
            tracing::info!("quit requested");
            break;
        }

        game.render();

        next_frame().await;
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {}

#[cfg(target_arch = "wasm32")]
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let msg = info.to_string();
        if let Some(location) = info.location() {
            miniquad::error!("panic at {}:{}: {}", location.file(), location.line(), msg);
        } else {
            miniquad::error!("panic: {}", msg);
        }
    }));
}

#[cfg(not(target_arch = "wasm32"))]
fn install_panic_hook() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_rects_follow_the_atlas_grid() {
        let rect = tile_source_rect(23).unwrap();
        assert_eq!((rect.x, rect.y), (48.0, 32.0));
        assert_eq!(rect.w, TILE_PIXEL_SIZE);
        assert!(tile_source_rect(layout::tile_count()).is_none());
    }

    #[test]
    fn board_scale_leaves_room_for_the_status_line() {
        let size = GridSize::new(40, 16);
        assert_eq!(board_scale(1280.0, 560.0, size), 2.0);
        assert_eq!(board_scale(640.0, 1000.0, size), 1.0);
    }

    #[test]
    fn fallback_arena_has_a_door_and_matches_config() {
        let config = GameConfig::default();
        let section = fallback_section(&config);
        assert_eq!(section.size(), config.size());
        assert_eq!(
            section.static_spawns().collect::<Vec<_>>(),
            vec![(Position::new(38, 1), ActorKind::Door)]
        );
    }

    #[test]
    fn unusable_start_section_falls_back_to_the_arena() {
        let config = GameConfig {
            start_section: 5,
            ..GameConfig::default()
        };
        let sections = vec![fallback_section(&config)];
        let game = build_game(config, sections);
        assert_eq!(game.level(), 0);
        assert_eq!(game.section_count(), 1);
    }

    #[test]
    fn palette_skips_empty_cells() {
        let palette = TilePalette;
        assert!(palette.terrain_color(&Cell::default()).is_none());
        let wall = Cell {
            solid: Some(15),
            ..Cell::default()
        };
        assert!(palette.terrain_color(&wall).is_some());
    }
}
