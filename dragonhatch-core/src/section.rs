use crate::actor::ActorKind;
use crate::error::MapError;
use crate::grid::{GridSize, Position};
use crate::tile::{TileClass, TileId, TileRules};

pub const SECTION_WIDTH: u32 = 40;
pub const SECTION_HEIGHT: u32 = 16;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    /// Collidable tile.
    pub solid: Option<TileId>,
    /// Walkable, purely visual tile.
    pub floor: Option<TileId>,
    /// Actor placed here when the level starts.
    pub spawn: Option<ActorKind>,
}

impl Cell {
    pub fn from_class(class: TileClass) -> Self {
        match class {
            TileClass::Empty => Self::default(),
            TileClass::Floor(tile) => Self {
                floor: Some(tile),
                ..Self::default()
            },
            TileClass::Wall(tile) => Self {
                solid: Some(tile),
                ..Self::default()
            },
            TileClass::Door => Self {
                spawn: Some(ActorKind::Door),
                ..Self::default()
            },
        }
    }

    pub fn is_collidable(&self) -> bool {
        self.solid.is_some()
    }

    pub fn visual_tile(&self) -> Option<TileId> {
        self.solid.or(self.floor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    size: GridSize,
    cells: Vec<Cell>,
}

impl Section {
    pub fn new(size: GridSize, cells: Vec<Cell>) -> Result<Self, MapError> {
        if cells.len() != size.cell_count() {
            return Err(MapError::CellCount {
                expected: size.cell_count(),
                found: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }

    pub fn from_raw(size: GridSize, values: &[u32], rules: &TileRules) -> Result<Self, MapError> {
        let cells = values
            .iter()
            .map(|&raw| Cell::from_class(rules.classify(raw)))
            .collect();
        Self::new(size, cells)
    }

    /// Open floor ringed by walls; stands in when no tile map could be loaded.
    pub fn arena(size: GridSize, floor_tile: TileId, wall_tile: TileId) -> Self {
        let cells = (0..size.cell_count())
            .map(|index| {
                let position = size.position(index);
                let edge = position.x == 0
                    || position.y == 0
                    || position.x == size.width as i32 - 1
                    || position.y == size.height as i32 - 1;
                if edge {
                    Cell::from_class(TileClass::Wall(wall_tile))
                } else {
                    Cell::from_class(TileClass::Floor(floor_tile))
                }
            })
            .collect();
        Self { size, cells }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.size.index(position).map(|index| &self.cells[index])
    }

    pub fn contains(&self, position: Position) -> bool {
        self.size.contains(position)
    }

    /// Out-of-bounds cells count as collidable.
    pub fn is_collidable(&self, position: Position) -> bool {
        self.cell(position).is_none_or(Cell::is_collidable)
    }

    pub fn set_wall(&mut self, position: Position, tile: TileId) -> bool {
        let Some(index) = self.size.index(position) else {
            return false;
        };
        let cell = &mut self.cells[index];
        cell.solid = Some(tile);
        cell.floor = None;
        true
    }

    pub fn set_spawn(&mut self, position: Position, kind: Option<ActorKind>) -> bool {
        let Some(index) = self.size.index(position) else {
            return false;
        };
        self.cells[index].spawn = kind;
        true
    }

    /// Initial spawns in row-major cell order.
    pub fn static_spawns(&self) -> impl Iterator<Item = (Position, ActorKind)> + '_ {
        self.cells.iter().enumerate().filter_map(|(index, cell)| {
            cell.spawn.map(|kind| (self.size.position(index), kind))
        })
    }
}
