//! Compass directions and grid positions.
//!
//! These are the two small value types shared by the grid model, the generator and the front end.
//! Coordinates are signed so that a step off the edge of the grid is still representable; the maze
//! treats every out-of-bounds position as fully walled.

use std::fmt;

/// One of the four sides of a maze cell.
///
/// The variants are cyclically ordered North, East, South, West. The discriminant doubles as the
/// index of the matching wall flag inside a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row `y - 1`.
    North = 0,
    /// Towards column `x + 1`.
    East = 1,
    /// Towards row `y + 1`.
    South = 2,
    /// Towards column `x - 1`.
    West = 3,
}

impl Direction {
    /// All directions in their cyclic order.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Returns the direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Returns the next direction in the cycle, turning a quarter clockwise.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Returns the `(dx, dy)` step for a single move in this direction.
    ///
    /// Rows grow southward, so North is a negative `dy`.
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Index of the wall flag for this direction.
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "North",
            Self::East => "East",
            Self::South => "South",
            Self::West => "West",
        };
        f.write_str(name)
    }
}

/// A `(column, row)` pair on the maze grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Column, growing eastward.
    pub x: isize,
    /// Row, growing southward.
    pub y: isize,
}

impl Position {
    /// Builds a position from its column and row.
    #[must_use]
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring position one step away in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
