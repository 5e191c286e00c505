use std::collections::HashSet;

use log::{debug, warn};
use rand::{seq::SliceRandom, Rng};

use super::{
    grid::{Grid, Point},
    snake_game::{Result, SnakeError},
};

/// Random samples tried before falling back to scanning for free cells.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1024;

/// Picks a uniformly random cell that is not in `occupied`.
///
/// # Errors
///
/// Returns [`SnakeError::NoFreeCell`] if every cell on the grid is occupied.
pub fn place_food<R: Rng + ?Sized>(
    grid: &Grid,
    occupied: &HashSet<Point>,
    rng: &mut R,
) -> Result<Point> {
    let size = grid.size();
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = Point::new(rng.gen_range(1..=size), rng.gen_range(1..=size));
        if !occupied.contains(&candidate) {
            return Ok(candidate);
        }
    }

    debug!("No free cell after {MAX_PLACEMENT_ATTEMPTS} samples. Scanning the board");
    let avaliable: Vec<Point> = grid.cells().filter(|p| !occupied.contains(p)).collect();
    if let Some(p) = avaliable.choose(rng) {
        Ok(*p)
    } else {
        warn!("No where left to place food");
        Err(SnakeError::NoFreeCell)
    }
}
