use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("failed to read tile map {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tile map contains no csv sections")]
    NoSections,

    #[error("section {section} ended after {found} of {expected} tiles")]
    Truncated {
        section: usize,
        expected: usize,
        found: usize,
    },

    #[error("expected {expected} cells for the section grid, got {found}")]
    CellCount { expected: usize, found: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("no sections to play")]
    NoSections,

    #[error("start section {start} is out of range ({count} sections loaded)")]
    StartOutOfRange { start: usize, count: usize },

    #[error("section is {found:?} but the game expects {expected:?}")]
    SizeMismatch {
        expected: crate::grid::GridSize,
        found: crate::grid::GridSize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("actor roster is full ({capacity} actors)")]
pub struct RosterFull {
    pub capacity: usize,
}
