use fastrand::Rng;

use crate::grid::{GridSize, Position};

/// Rejection-samples a uniformly random cell accepted by `is_free`, giving up
/// after `retries` rejected draws.
pub fn sample_free_cell<F>(
    rng: &mut Rng,
    size: GridSize,
    retries: u32,
    mut is_free: F,
) -> Option<Position>
where
    F: FnMut(Position) -> bool,
{
    if size.width == 0 || size.height == 0 {
        return None;
    }

    for _ in 0..retries {
        let candidate = Position::new(
            rng.i32(0..size.width as i32),
            rng.i32(0..size.height as i32),
        );
        if is_free(candidate) {
            return Some(candidate);
        }
    }

    None
}
