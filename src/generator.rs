//! Random perfect-maze generation.
//!
//! Mazes are carved with a randomized depth-first backtracker: starting from a random cell, walk
//! into an unvisited neighbour chosen in shuffled order, opening the wall on the way, and back up
//! once a cell has no unvisited neighbours left. Every cell is entered exactly once through exactly
//! one opened wall, so the open edges form a spanning tree of the grid. A single boundary wall is
//! then opened as the exit.
//!
//! The walk keeps its own stack instead of recursing, so grid size is bounded by memory rather than
//! by the call stack. It consumes random numbers in the same order a recursive walk would.

use rand::{rngs::StdRng, seq::SliceRandom as _, Rng, SeedableRng as _};
use tracing::debug;

use crate::{
    direction::{Direction, Position},
    maze::Maze,
};

/// The opening carved through the outer boundary of a generated maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exit {
    /// Boundary cell the exit belongs to.
    pub position: Position,
    /// Outward side of [`position`](Exit::position) that was opened.
    pub direction: Direction,
}

impl Exit {
    /// Returns whether leaving `from` towards `direction` passes through this exit.
    #[must_use]
    pub fn is_crossed_by(&self, from: Position, direction: Direction) -> bool {
        self.position == from && self.direction == direction
    }
}

/// Output of [`generate`]: the carved maze, where the player starts and where they leave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedMaze {
    /// The perfect maze with one boundary opening.
    pub maze: Maze,
    /// Cell the carving started from.
    pub start: Position,
    /// The single opening in the outer boundary.
    pub exit: Exit,
}

/// Carves a random perfect maze of `width` x `height` cells and opens one exit on its boundary.
///
/// The same `rng` state always produces the same maze, start and exit.
///
/// # Panics
///
/// Panics if `width` or `height` is zero, like [`Maze::new`].
pub fn generate<R>(width: usize, height: usize, rng: &mut R) -> GeneratedMaze
where
    R: Rng + ?Sized,
{
    let mut maze = Maze::new(width, height);

    let start = Position::new(
        coordinate(rng.random_range(0..width)),
        coordinate(rng.random_range(0..height)),
    );
    carve(&mut maze, start, rng);

    let exit = pick_exit(width, height, rng);
    maze.remove_wall(exit.position.x, exit.position.y, exit.direction);
    debug!(
        width,
        height,
        %start,
        exit = %exit.position,
        side = %exit.direction,
        "generated maze"
    );

    GeneratedMaze { maze, start, exit }
}

/// Same as [`generate`], driven by a [`StdRng`] seeded from `seed`.
///
/// # Panics
///
/// Panics if `width` or `height` is zero.
#[must_use]
pub fn generate_seeded(width: usize, height: usize, seed: u64) -> GeneratedMaze {
    generate(width, height, &mut StdRng::seed_from_u64(seed))
}

/// One cell of the depth-first walk and the neighbours it still has to try.
struct Frame {
    /// Cell being expanded.
    position: Position,
    /// Neighbour directions in the order they will be tried.
    directions: [Direction; 4],
    /// Index of the next direction to try.
    next: usize,
}

impl Frame {
    /// Enters `position`, fixing the random order of its neighbours.
    fn enter<R>(position: Position, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);
        Self {
            position,
            directions,
            next: 0,
        }
    }
}

/// Runs the backtracker from `start` until every reachable cell has been visited.
fn carve<R>(maze: &mut Maze, start: Position, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let mut visited = Visited::new(maze.width(), maze.height());
    visited.mark(start);
    let mut stack = vec![Frame::enter(start, rng)];

    while let Some(frame) = stack.last_mut() {
        let Some(&direction) = frame.directions.get(frame.next) else {
            let _ = stack.pop();
            continue;
        };
        frame.next += 1;

        let current = frame.position;
        let next = current.step(direction);
        if maze.is_valid(next.x, next.y) && !visited.contains(next) {
            maze.remove_wall(current.x, current.y, direction);
            visited.mark(next);
            stack.push(Frame::enter(next, rng));
        }
    }
}

/// Picks a boundary side uniformly, then a uniform cell along it.
fn pick_exit<R>(width: usize, height: usize, rng: &mut R) -> Exit
where
    R: Rng + ?Sized,
{
    let last_col = coordinate(width - 1);
    let last_row = coordinate(height - 1);

    let (position, direction) = match rng.random_range(0..4_u8) {
        0 => (
            Position::new(coordinate(rng.random_range(0..width)), 0),
            Direction::North,
        ),
        1 => (
            Position::new(coordinate(rng.random_range(0..width)), last_row),
            Direction::South,
        ),
        2 => (
            Position::new(last_col, coordinate(rng.random_range(0..height))),
            Direction::East,
        ),
        _ => (
            Position::new(0, coordinate(rng.random_range(0..height))),
            Direction::West,
        ),
    };

    Exit {
        position,
        direction,
    }
}

/// Converts a grid index into a signed coordinate.
fn coordinate(index: usize) -> isize {
    isize::try_from(index).unwrap_or(isize::MAX)
}

/// Visited flags for the walk, indexed `[row][col]` like the maze itself.
struct Visited {
    /// One vector of flags per row.
    rows: Vec<Vec<bool>>,
}

impl Visited {
    /// All cells unvisited.
    fn new(width: usize, height: usize) -> Self {
        Self {
            rows: vec![vec![false; width]; height],
        }
    }

    /// Returns whether `position` was already entered.
    fn contains(&self, position: Position) -> bool {
        Self::slot(position).is_some_and(|(col, row)| {
            self.rows
                .get(row)
                .and_then(|flags| flags.get(col))
                .copied()
                .unwrap_or(false)
        })
    }

    /// Records `position` as entered.
    fn mark(&mut self, position: Position) {
        if let Some((col, row)) = Self::slot(position) {
            if let Some(flag) = self.rows.get_mut(row).and_then(|flags| flags.get_mut(col)) {
                *flag = true;
            }
        }
    }

    /// Storage indices of `position`, if it is non-negative.
    fn slot(position: Position) -> Option<(usize, usize)> {
        Some((
            usize::try_from(position.x).ok()?,
            usize::try_from(position.y).ok()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use super::*;

    /// Collects every cell reachable from `(0, 0)` through open interior walls.
    fn reachable(maze: &Maze) -> HashSet<Position> {
        let origin = Position::new(0, 0);
        let mut seen = HashSet::from([origin]);
        let mut queue = VecDeque::from([origin]);

        while let Some(pos) = queue.pop_front() {
            for direction in Direction::ALL {
                let next = pos.step(direction);
                if maze.is_valid(next.x, next.y)
                    && !maze.has_wall(pos.x, pos.y, direction)
                    && seen.insert(next)
                {
                    queue.push_back(next);
                }
            }
        }

        seen
    }

    #[test]
    fn test_generated_maze_is_perfect() {
        for seed in 0..25 {
            let generated = generate_seeded(9, 6, seed);
            let maze = &generated.maze;

            assert_eq!(maze.open_edges(), 9 * 6 - 1, "seed {seed} is not a tree");
            assert_eq!(reachable(maze).len(), 9 * 6, "seed {seed} is not connected");
        }
    }

    #[test]
    fn test_exactly_one_exit_is_opened() {
        for seed in 0..25 {
            let generated = generate_seeded(5, 7, seed);

            assert_eq!(
                generated.maze.boundary_openings(),
                vec![(generated.exit.position, generated.exit.direction)]
            );
        }
    }

    #[test]
    fn test_exit_points_out_of_the_maze() {
        for seed in 0..25 {
            let generated = generate_seeded(4, 4, seed);
            let beyond = generated.exit.position.step(generated.exit.direction);

            assert!(generated
                .maze
                .is_valid(generated.exit.position.x, generated.exit.position.y));
            assert!(!generated.maze.is_valid(beyond.x, beyond.y));
            assert!(generated
                .exit
                .is_crossed_by(generated.exit.position, generated.exit.direction));
        }
    }

    #[test]
    fn test_start_is_inside_the_maze() {
        for seed in 0..25 {
            let generated = generate_seeded(3, 8, seed);

            assert!(generated
                .maze
                .is_valid(generated.start.x, generated.start.y));
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        let first = generate(12, 9, &mut StdRng::seed_from_u64(99));
        let second = generate(12, 9, &mut StdRng::seed_from_u64(99));

        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_differ() {
        let mazes: HashSet<String> = (0..10)
            .map(|seed| generate_seeded(10, 10, seed).maze.to_string())
            .collect();

        assert!(mazes.len() > 1, "ten seeds should not all carve the same maze");
    }

    #[test]
    fn test_single_cell_maze() {
        let generated = generate_seeded(1, 1, 5);

        assert_eq!(generated.start, Position::new(0, 0));
        assert_eq!(generated.exit.position, Position::new(0, 0));
        assert_eq!(generated.maze.open_edges(), 0);
        assert_eq!(generated.maze.boundary_openings().len(), 1);
    }

    #[test]
    fn test_single_row_maze_is_a_corridor() {
        let generated = generate_seeded(6, 1, 11);

        assert_eq!(generated.maze.open_edges(), 5);
        for x in 0..5 {
            assert!(!generated.maze.has_wall(x, 0, Direction::East));
        }
    }

    #[test]
    fn test_every_boundary_side_can_be_chosen() {
        let sides: HashSet<Direction> = (0..200)
            .map(|seed| generate_seeded(3, 3, seed).exit.direction)
            .collect();

        assert_eq!(sides.len(), 4);
    }

    #[test]
    fn test_large_maze_does_not_exhaust_the_stack() {
        let generated = generate_seeded(200, 200, 1);

        assert_eq!(generated.maze.open_edges(), 200 * 200 - 1);
    }

    #[test]
    #[should_panic(expected = "maze dimensions must be at least 1x1")]
    fn test_zero_dimensions_panic() {
        let _ = generate_seeded(0, 3, 0);
    }
}
