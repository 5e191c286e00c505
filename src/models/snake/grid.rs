//! The bounded square board.
//!
//! Coordinates are 1-indexed: `x` counts columns left to right and `y`
//! counts rows top to bottom, so increasing `y` moves down the screen.

use super::{
    direction::Direction,
    snake_game::{Result, SnakeError, MAX_BOARD_SIZE, MIN_BOARD_SIZE},
};

/// A cell on the grid. May lie outside the board (a head that hit a wall).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `direction`.
    #[must_use]
    pub fn moved(self, direction: Direction) -> Self {
        let (dx, dy) = direction.value();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    size: i32,
}

impl Grid {
    /// # Errors
    ///
    /// Returns [`SnakeError::InvalidBoardSize`] if `size` is outside
    /// `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    pub fn new(size: i32) -> Result<Self> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(SnakeError::InvalidBoardSize(size));
        }
        Ok(Self { size })
    }

    #[must_use]
    pub fn size(&self) -> i32 {
        self.size
    }

    #[must_use]
    pub fn is_in_bounds(&self, p: Point) -> bool {
        (1..=self.size).contains(&p.x) && (1..=self.size).contains(&p.y)
    }

    /// Number of cells on the board.
    #[must_use]
    pub fn capacity(&self) -> usize {
        // size is validated to a small positive range
        usize::try_from(self.size * self.size).unwrap_or(0)
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Point> {
        let size = self.size;
        (1..=size).flat_map(move |y| (1..=size).map(move |x| Point::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_one_indexed() {
        let grid = Grid::new(20).unwrap();
        assert!(grid.is_in_bounds(Point::new(1, 1)));
        assert!(grid.is_in_bounds(Point::new(20, 20)));
        assert!(grid.is_in_bounds(Point::new(10, 10)));
        assert!(!grid.is_in_bounds(Point::new(0, 5)));
        assert!(!grid.is_in_bounds(Point::new(5, 0)));
        assert!(!grid.is_in_bounds(Point::new(21, 5)));
        assert!(!grid.is_in_bounds(Point::new(5, 21)));
    }

    #[test]
    fn test_rejects_bad_sizes() {
        assert!(matches!(
            Grid::new(MIN_BOARD_SIZE - 1),
            Err(SnakeError::InvalidBoardSize(_))
        ));
        assert!(matches!(
            Grid::new(MAX_BOARD_SIZE + 1),
            Err(SnakeError::InvalidBoardSize(_))
        ));
    }

    #[test]
    fn test_cells_cover_board_row_major() {
        let grid = Grid::new(10).unwrap();
        let cells: Vec<Point> = grid.cells().collect();
        assert_eq!(cells.len(), grid.capacity());
        assert_eq!(cells[0], Point::new(1, 1));
        assert_eq!(cells[1], Point::new(2, 1));
        assert_eq!(cells[10], Point::new(1, 2));
        assert!(cells.iter().all(|p| grid.is_in_bounds(*p)));
    }

    #[test]
    fn test_moved_uses_downward_y() {
        let p = Point::new(10, 10);
        assert_eq!(p.moved(Direction::Up), Point::new(10, 9));
        assert_eq!(p.moved(Direction::Down), Point::new(10, 11));
        assert_eq!(p.moved(Direction::Right), Point::new(11, 10));
        assert_eq!(p.moved(Direction::Left), Point::new(9, 10));
    }
}
