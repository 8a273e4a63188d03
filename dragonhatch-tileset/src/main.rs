#![cfg(feature = "generator")]

use std::error::Error;
use std::path::{Path, PathBuf};

use dragonhatch_core::GameConfig;
use dragonhatch_tileset::generator::build_tileset_image;
use dragonhatch_tileset::layout;

fn workspace_root() -> Result<PathBuf, Box<dyn Error>> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .ok_or("crate has no parent directory")?;
    Ok(root.to_path_buf())
}

fn main() -> Result<(), Box<dyn Error>> {
    let root = workspace_root()?;
    let assets = root.join("assets");
    std::fs::create_dir_all(&assets)?;

    // Paint floors the way the game will classify them.
    let config_path = assets.join("config.json");
    let config = if config_path.exists() {
        GameConfig::load(&config_path)?
    } else {
        GameConfig::default()
    };

    for tileset in 0..layout::TILESET_COUNT {
        let atlas = build_tileset_image(tileset, &config.tiles);
        let path = assets.join(layout::tileset_file_name(tileset));
        atlas.save(&path)?;
        println!("wrote {}", path.display());
    }

    Ok(())
}
