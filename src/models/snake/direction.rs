/// Heading of the snake on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const VARIANTS: &'static [Direction] = &[Self::Up, Self::Down, Self::Left, Self::Right];

    /// `(dx, dy)` offset of one step. `y` grows downward so `Up` is `-1`.
    #[must_use]
    pub fn value(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    #[must_use]
    pub fn get_opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    #[must_use]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.get_opposite() == other
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_follow_screen_coordinates() {
        assert_eq!(Direction::Right.value(), (1, 0));
        assert_eq!(Direction::Left.value(), (-1, 0));
        assert_eq!(Direction::Up.value(), (0, -1));
        assert_eq!(Direction::Down.value(), (0, 1));
    }

    #[test]
    fn test_opposites() {
        for d in Direction::VARIANTS {
            assert!(d.is_opposite(d.get_opposite()));
            assert!(!d.is_opposite(*d));
            let (dx, dy) = d.value();
            assert_eq!(d.get_opposite().value(), (-dx, -dy));
        }
    }
}
