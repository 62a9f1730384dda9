//! Player state while walking through a single maze.
//!
//! The game is played with one button: the player's facing turns on its own and the button moves
//! one cell forward. Reaching the outside of the maze through an opening wins the session. All of
//! this is decided purely from [`Maze::has_wall`] and the maze dimensions.

use crate::{
    direction::{Direction, Position},
    maze::Maze,
};

/// Outcome of a single [`Session::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// The player moved to the neighbouring cell.
    Moved,
    /// A wall stood in the way.
    Blocked,
    /// The player left the maze through an opening.
    Escaped,
    /// The session was already won; nothing changed.
    Finished,
}

/// A player walking through one maze.
#[derive(Clone, Debug)]
pub(crate) struct Session {
    /// Maze being played, read-only for the whole session.
    pub maze: Maze,
    /// Current cell of the player.
    pub player: Position,
    /// Direction the next step will take.
    pub facing: Direction,
    /// Side through which the player left the maze, once they have.
    pub escaped: Option<Direction>,
}

impl Session {
    /// Places the player on `start`, facing North.
    pub(crate) const fn new(maze: Maze, start: Position) -> Self {
        Self {
            maze,
            player: start,
            facing: Direction::North,
            escaped: None,
        }
    }

    /// Returns whether the player has left the maze.
    pub(crate) const fn has_won(&self) -> bool {
        self.escaped.is_some()
    }

    /// Turns the player a quarter clockwise. Does nothing once the session is won.
    pub(crate) fn rotate(&mut self) {
        if !self.has_won() {
            self.facing = self.facing.clockwise();
        }
    }

    /// Tries to move one cell in the facing direction.
    pub(crate) fn advance(&mut self) -> Step {
        if self.has_won() {
            return Step::Finished;
        }
        if self
            .maze
            .has_wall(self.player.x, self.player.y, self.facing)
        {
            return Step::Blocked;
        }

        let next = self.player.step(self.facing);
        if self.maze.is_valid(next.x, next.y) {
            self.player = next;
            Step::Moved
        } else {
            self.escaped = Some(self.facing);
            Step::Escaped
        }
    }

    /// Returns where to draw the player: their cell, or the cell just past the exit once won.
    pub(crate) const fn display_position(&self) -> Position {
        match self.escaped {
            Some(direction) => self.player.step(direction),
            None => self.player,
        }
    }
}
