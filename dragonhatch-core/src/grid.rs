use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, step: Step) -> Self {
        Self::new(self.x + step.dx, self.y + step.dy)
    }

    pub fn distance_squared(self, other: Position) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// A single-tick displacement; both components are always in `-1..=1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Step {
    pub dx: i32,
    pub dy: i32,
}

impl Step {
    pub const NONE: Step = Step { dx: 0, dy: 0 };

    pub fn new(dx: i32, dy: i32) -> Self {
        Self {
            dx: dx.signum(),
            dy: dy.signum(),
        }
    }

    /// Unit step from `from` toward `to`, each axis chosen independently.
    pub fn toward(from: Position, to: Position) -> Self {
        Self::new(to.x - from.x, to.y - from.y)
    }

    pub fn is_none(self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    pub fn is_diagonal(self) -> bool {
        self.dx != 0 && self.dy != 0
    }
}

/// The eight neighbouring offsets, row by row from the top-left.
pub const NEIGHBOURS: [Step; 8] = [
    Step { dx: -1, dy: -1 },
    Step { dx: 0, dy: -1 },
    Step { dx: 1, dy: -1 },
    Step { dx: -1, dy: 0 },
    Step { dx: 1, dy: 0 },
    Step { dx: -1, dy: 1 },
    Step { dx: 0, dy: 1 },
    Step { dx: 1, dy: 1 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn step(self) -> Step {
        match self {
            Direction::Up => Step::new(0, -1),
            Direction::Down => Step::new(0, 1),
            Direction::Left => Step::new(-1, 0),
            Direction::Right => Step::new(1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub fn index(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        Some(position.x as usize + position.y as usize * self.width as usize)
    }

    pub fn position(&self, index: usize) -> Position {
        let width = self.width.max(1) as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }
}
