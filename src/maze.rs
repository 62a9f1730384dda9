//! Grid model for rectangular mazes.
//!
//! A [`Maze`] is a lattice of [`Cell`]s, each carrying one wall flag per [`Direction`]. The wall
//! between two adjacent cells is stored on both of them, and the only way to change it is through
//! [`Maze::remove_wall`] and [`Maze::add_wall`], which always update both sides together.

use std::collections::VecDeque;

use crate::direction::{Direction, Position};

/// The four wall flags of a single maze cell.
///
/// Cells can be inspected freely but only a [`Maze`] can change them, which keeps the wall shared
/// by two neighbours consistent on both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Wall flags indexed by [`Direction`] discriminant.
    walls: [bool; 4],
}

impl Cell {
    /// A cell with all four walls standing.
    const fn enclosed() -> Self {
        Self { walls: [true; 4] }
    }

    /// Returns whether the wall on the given side is present.
    #[must_use]
    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls.get(direction.index()).copied().unwrap_or(true)
    }

    /// Returns whether all four walls are present.
    #[must_use]
    pub fn is_enclosed(&self) -> bool {
        self.walls.iter().all(|wall| *wall)
    }

    /// Overwrites a single flag. Only reachable through the paired maze mutators.
    fn set_wall(&mut self, direction: Direction, present: bool) {
        if let Some(wall) = self.walls.get_mut(direction.index()) {
            *wall = present;
        }
    }
}

/// A rectangular maze of `width` columns and `height` rows.
///
/// Cells are stored as `[row][col]`. Any coordinate outside the grid behaves as a fully walled
/// cell, so callers never have to special-case the boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Cell storage, one vector per row.
    grid: Vec<Vec<Cell>>,
}

impl Maze {
    /// Builds a maze of the given size with every wall present.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero. Dimensions are a caller contract, not something to
    /// recover from at runtime.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width >= 1 && height >= 1,
            "maze dimensions must be at least 1x1, got {width}x{height}"
        );

        Self {
            width,
            height,
            grid: vec![vec![Cell::enclosed(); width]; height],
        }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns whether `(x, y)` lies inside the grid.
    #[must_use]
    pub fn is_valid(&self, x: isize, y: isize) -> bool {
        self.index(x, y).is_some()
    }

    /// Returns the cell at `(x, y)`, or `None` when it lies outside the grid.
    #[must_use]
    pub fn cell(&self, x: isize, y: isize) -> Option<&Cell> {
        let (col, row) = self.index(x, y)?;
        self.grid.get(row)?.get(col)
    }

    /// Returns whether the wall on side `direction` of `(x, y)` is present.
    ///
    /// Out-of-bounds coordinates always report a wall.
    #[must_use]
    pub fn has_wall(&self, x: isize, y: isize, direction: Direction) -> bool {
        self.cell(x, y).is_none_or(|cell| cell.has_wall(direction))
    }

    /// Opens the wall on side `direction` of `(x, y)`, along with the matching wall of the
    /// neighbour when that neighbour is inside the grid.
    ///
    /// Does nothing when `(x, y)` itself lies outside the grid.
    pub fn remove_wall(&mut self, x: isize, y: isize, direction: Direction) {
        self.set_wall(x, y, direction, false);
    }

    /// Closes the wall on side `direction` of `(x, y)`, along with the matching wall of the
    /// neighbour when that neighbour is inside the grid.
    ///
    /// Does nothing when `(x, y)` itself lies outside the grid.
    pub fn add_wall(&mut self, x: isize, y: isize, direction: Direction) {
        self.set_wall(x, y, direction, true);
    }

    /// Counts the interior edges that have no wall.
    ///
    /// Only East and South sides are visited so that every shared edge is counted once; the
    /// East side of the last column and South side of the last row are boundary edges and are
    /// skipped.
    #[must_use]
    pub fn open_edges(&self) -> usize {
        self.positions()
            .map(|pos| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|direction| {
                        let next = pos.step(*direction);
                        self.is_valid(next.x, next.y) && !self.has_wall(pos.x, pos.y, *direction)
                    })
                    .count()
            })
            .sum()
    }

    /// Lists every boundary cell side whose wall is missing, as `(cell, outward direction)`.
    #[must_use]
    pub fn boundary_openings(&self) -> Vec<(Position, Direction)> {
        self.positions()
            .flat_map(|pos| {
                Direction::ALL.into_iter().filter_map(move |direction| {
                    let next = pos.step(direction);
                    (!self.is_valid(next.x, next.y) && !self.has_wall(pos.x, pos.y, direction))
                        .then_some((pos, direction))
                })
            })
            .collect()
    }

    /// Returns whether the interior open edges form a spanning tree: every cell reachable from every
    /// other through exactly one simple path. Boundary openings are ignored.
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        let cells = self.width * self.height;
        if self.open_edges() != cells - 1 {
            return false;
        }

        let mut seen = vec![vec![false; self.width]; self.height];
        let mut queue = VecDeque::from([Position::new(0, 0)]);
        let mut reached = 0;
        while let Some(pos) = queue.pop_front() {
            let Some((col, row)) = self.index(pos.x, pos.y) else {
                continue;
            };
            let Some(flag) = seen.get_mut(row).and_then(|flags| flags.get_mut(col)) else {
                continue;
            };
            if *flag {
                continue;
            }
            *flag = true;
            reached += 1;

            for direction in Direction::ALL {
                let next = pos.step(direction);
                if self.is_valid(next.x, next.y) && !self.has_wall(pos.x, pos.y, direction) {
                    queue.push_back(next);
                }
            }
        }

        reached == cells
    }

    /// Iterates over every in-bounds position, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width).filter_map(move |col| {
                Some(Position::new(
                    isize::try_from(col).ok()?,
                    isize::try_from(row).ok()?,
                ))
            })
        })
    }

    /// Converts signed coordinates into `(col, row)` storage indices.
    fn index(&self, x: isize, y: isize) -> Option<(usize, usize)> {
        let col = usize::try_from(x).ok()?;
        let row = usize::try_from(y).ok()?;
        (col < self.width && row < self.height).then_some((col, row))
    }

    /// Writes one shared wall on both of its sides.
    fn set_wall(&mut self, x: isize, y: isize, direction: Direction, present: bool) {
        let Some((col, row)) = self.index(x, y) else {
            return;
        };
        if let Some(cell) = self.grid.get_mut(row).and_then(|cells| cells.get_mut(col)) {
            cell.set_wall(direction, present);
        }

        let next = Position::new(x, y).step(direction);
        if let Some((col, row)) = self.index(next.x, next.y) {
            if let Some(cell) = self.grid.get_mut(row).and_then(|cells| cells.get_mut(col)) {
                cell.set_wall(direction.opposite(), present);
            }
        }
    }
}
