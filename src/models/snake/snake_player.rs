//! Module for containing the snake's body and heading.
use std::collections::{HashSet, VecDeque};

use super::{direction::Direction, grid::Point};

/// The player's snake. Segment 0 is the head.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakePlayer {
    squares_taken: VecDeque<Point>,
    heading: Direction,
    pending: Direction,
}

impl SnakePlayer {
    /// Creates a one segment snake at `head`.
    #[must_use]
    pub fn new(head: Point, heading: Direction) -> Self {
        let mut squares_taken = VecDeque::new();
        squares_taken.push_front(head);
        Self {
            squares_taken,
            heading,
            pending: heading,
        }
    }

    /// Creates a snake from its segments, head first. Returns `None` if
    /// `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: impl IntoIterator<Item = Point>, heading: Direction) -> Option<Self> {
        let squares_taken: VecDeque<Point> = segments.into_iter().collect();
        if squares_taken.is_empty() {
            return None;
        }
        Some(Self {
            squares_taken,
            heading,
            pending: heading,
        })
    }

    #[must_use]
    pub fn get_head(&self) -> Point {
        // never empty: constructors require a segment and shed_tail keeps one
        self.squares_taken[0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.squares_taken.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.squares_taken.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.squares_taken.iter()
    }

    #[must_use]
    pub fn occupied(&self) -> HashSet<Point> {
        self.squares_taken.iter().copied().collect()
    }

    /// Direction of the last move.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Direction the next move will take.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    /// Queues a turn for the next move. A turn straight back into the neck
    /// is refused and `false` is returned.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.heading.is_opposite(direction) {
            return false;
        }
        self.pending = direction;
        true
    }

    /// Moves the head one cell along the pending direction and returns it.
    /// The tail is left in place.
    pub fn advance(&mut self) -> Point {
        self.heading = self.pending;
        let new_head = self.get_head().moved(self.heading);
        self.squares_taken.push_front(new_head);
        new_head
    }

    /// Drops the last segment. The head is never removed.
    pub fn shed_tail(&mut self) -> Option<Point> {
        if self.squares_taken.len() > 1 {
            self.squares_taken.pop_back()
        } else {
            None
        }
    }

    /// True if the head shares a cell with any other segment.
    #[must_use]
    pub fn head_hits_body(&self) -> bool {
        let head = self.get_head();
        self.squares_taken.iter().skip(1).any(|p| *p == head)
    }
}
