use image::{Rgba, RgbaImage};

use crate::layout;
use dragonhatch_core::{ActorKind, TileId, TileRules};

#[derive(Clone, Copy)]
struct Color {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

fn color_from_rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
    Color {
        r: r as f32 / 255.0,
        g: g as f32 / 255.0,
        b: b as f32 / 255.0,
        a: a as f32 / 255.0,
    }
}

fn color_to_rgba(color: Color) -> Rgba<u8> {
    let to_u8 = |channel: f32| -> u8 { (channel.clamp(0.0, 1.0) * 255.0).round() as u8 };
    Rgba([
        to_u8(color.r),
        to_u8(color.g),
        to_u8(color.b),
        to_u8(color.a),
    ])
}

struct Palette {
    floor: Color,
    wall: Color,
}

fn palette_for(tileset: usize) -> Palette {
    match tileset % layout::TILESET_COUNT {
        0 => Palette {
            floor: color_from_rgba(86, 70, 52, 255),
            wall: color_from_rgba(120, 120, 120, 255),
        },
        1 => Palette {
            floor: color_from_rgba(48, 82, 60, 255),
            wall: color_from_rgba(96, 110, 140, 255),
        },
        _ => Palette {
            floor: color_from_rgba(92, 58, 58, 255),
            wall: color_from_rgba(150, 110, 74, 255),
        },
    }
}

fn sprite_color(kind: ActorKind) -> Color {
    match kind {
        ActorKind::Human => color_from_rgba(235, 215, 170, 255),
        ActorKind::FireDragon => color_from_rgba(220, 60, 30, 255),
        ActorKind::WaterDragon => color_from_rgba(40, 110, 220, 255),
        ActorKind::EarthDragon => color_from_rgba(110, 160, 50, 255),
        ActorKind::AirDragon => color_from_rgba(200, 220, 240, 255),
        ActorKind::Egg => color_from_rgba(240, 235, 200, 255),
        ActorKind::SlowPotion => color_from_rgba(120, 80, 200, 255),
        ActorKind::WallPotion => color_from_rgba(200, 160, 40, 255),
        ActorKind::Key => color_from_rgba(250, 210, 40, 255),
        ActorKind::Door => color_from_rgba(110, 70, 30, 255),
        ActorKind::Used => color_from_rgba(0, 0, 0, 0),
    }
}

fn apply_saturation_and_brightness(color: Color, saturation: f32, brightness: f32) -> Color {
    let intensity = (color.r + color.g + color.b) / 3.0;
    let adjust = |channel: f32| -> f32 {
        let saturated = intensity + (channel - intensity) * saturation;
        (saturated * brightness).clamp(0.0, 1.0)
    };

    Color {
        r: adjust(color.r),
        g: adjust(color.g),
        b: adjust(color.b),
        a: color.a,
    }
}

/// Small per-tile brightness shift so neighbouring ids read as distinct tiles.
fn tile_variation(tile: u32) -> f32 {
    0.85 + ((tile * 37) % 7) as f32 * 0.05
}

fn fill_rect(
    image: &mut RgbaImage,
    start_x: u32,
    start_y: u32,
    width: u32,
    height: u32,
    color: Color,
) {
    let rgba = color_to_rgba(color);

    for dy in 0..height {
        for dx in 0..width {
            image.put_pixel(start_x + dx, start_y + dy, rgba);
        }
    }
}

fn fill_disc(
    image: &mut RgbaImage,
    start_x: u32,
    start_y: u32,
    radius_x: f32,
    radius_y: f32,
    color: Color,
) {
    let size = layout::TILE_PIXEL_SIZE;
    let center = size as f32 / 2.0;
    let rgba = color_to_rgba(color);

    for dy in 0..size {
        for dx in 0..size {
            let nx = (dx as f32 + 0.5 - center) / radius_x;
            let ny = (dy as f32 + 0.5 - center) / radius_y;
            if nx * nx + ny * ny <= 1.0 {
                image.put_pixel(start_x + dx, start_y + dy, rgba);
            }
        }
    }
}

fn draw_floor(image: &mut RgbaImage, tile: u32, base: Color) {
    let (x, y) = layout::tile_pixel_position(tile);
    let size = layout::TILE_PIXEL_SIZE;
    let color = apply_saturation_and_brightness(base, 1.0, tile_variation(tile));
    fill_rect(image, x, y, size, size, color);

    let speck = apply_saturation_and_brightness(color, 0.8, 1.2);
    for i in 0..4 {
        let sx = (tile * 5 + i * 7) % size;
        let sy = (tile * 3 + i * 11) % size;
        fill_rect(image, x + sx, y + sy, 1, 1, speck);
    }
}

fn draw_wall(image: &mut RgbaImage, tile: u32, base: Color) {
    let (x, y) = layout::tile_pixel_position(tile);
    let size = layout::TILE_PIXEL_SIZE;
    let color = apply_saturation_and_brightness(base, 1.1, tile_variation(tile));
    let mortar = apply_saturation_and_brightness(base, 0.5, 0.4);

    fill_rect(image, x, y, size, size, mortar);
    let brick_h = size / 4;
    for row in 0..4 {
        let offset = if row % 2 == 0 { 0 } else { size / 4 };
        let by = y + row * brick_h;
        fill_rect(image, x, by, size, brick_h - 1, color);
        fill_rect(image, x + offset, by, 1, brick_h, mortar);
        fill_rect(image, x + (offset + size / 2) % size, by, 1, brick_h, mortar);
    }
}

fn draw_sprite(image: &mut RgbaImage, tile: u32, kind: ActorKind) {
    let (x, y) = layout::tile_pixel_position(tile);
    let size = layout::TILE_PIXEL_SIZE;
    let color = sprite_color(kind);
    let outline = color_from_rgba(0, 0, 0, 255);

    match kind {
        ActorKind::Door => {
            fill_rect(image, x + 2, y, size - 4, size, outline);
            fill_rect(image, x + 3, y + 1, size - 6, size - 1, color);
            fill_rect(image, x + size - 6, y + size / 2, 2, 2, sprite_color(ActorKind::Key));
        }
        ActorKind::Key => {
            fill_disc(image, x, y, 3.5, 3.5, color);
            fill_rect(image, x + size / 2, y + size / 2 - 1, size / 2 - 2, 2, color);
            fill_rect(image, x + size - 5, y + size / 2, 2, 3, color);
        }
        ActorKind::SlowPotion | ActorKind::WallPotion => {
            fill_rect(image, x + 6, y + 2, 4, 4, outline);
            fill_disc(image, x, y + 2, 5.0, 5.0, outline);
            fill_disc(image, x, y + 2, 4.0, 4.0, color);
        }
        ActorKind::Egg => {
            fill_disc(image, x, y, 5.5, 7.0, outline);
            fill_disc(image, x, y, 4.5, 6.0, color);
        }
        ActorKind::Used => {}
        _ => {
            fill_disc(image, x, y, 7.0, 7.0, outline);
            fill_disc(image, x, y, 6.0, 6.0, color);
            let eye = color_from_rgba(0, 0, 0, 255);
            fill_rect(image, x + 5, y + 5, 2, 2, eye);
            fill_rect(image, x + size - 7, y + 5, 2, 2, eye);
        }
    }
}

/// Paints placeholder art for one of the rotating tilesets: floor and wall
/// tiles according to `rules`, and a sprite in every actor cell.
pub fn build_tileset_image(tileset: usize, rules: &TileRules) -> RgbaImage {
    let (width_px, height_px) = layout::atlas_pixel_size();
    let mut atlas = RgbaImage::from_pixel(width_px, height_px, Rgba([0, 0, 0, 0]));
    let palette = palette_for(tileset);

    for tile in 0..layout::tile_count() {
        if let Some(kind) = layout::sprite_kind_at(tile) {
            draw_sprite(&mut atlas, tile, kind);
            continue;
        }

        let is_floor = TileId::try_from(tile).is_ok_and(|id| rules.is_floor_tile(id));
        if is_floor {
            draw_floor(&mut atlas, tile, palette.floor);
        } else {
            draw_wall(&mut atlas, tile, palette.wall);
        }
    }

    atlas
}
