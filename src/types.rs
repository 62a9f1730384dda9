//! Type definitions and enums for the application state and navigation.

use std::{fmt, time::Duration};

use clap::ValueEnum;

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Title screen with the settings menu, holding the highlighted item.
    Title(TitleItem),
    /// In-game maze screen.
    Maze,
    /// Credits and controls.
    About,
}

/// Title menu navigation options.
///
/// Items are listed top to bottom in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TitleItem {
    /// Starts a session with the current settings.
    Start,
    /// Cycles the player rotation speed.
    Speed,
    /// Cycles the size of generated mazes.
    Size,
    /// Cycles between a generated maze and the loaded levels.
    Level,
    /// Opens the about screen.
    About,
    /// Leaves the application.
    Quit,
}

impl TitleItem {
    /// All items in menu order.
    pub(crate) const ALL: [Self; 6] = [
        Self::Start,
        Self::Speed,
        Self::Size,
        Self::Level,
        Self::About,
        Self::Quit,
    ];

    /// Returns the item below this one, staying on the last item.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::Start => Self::Speed,
            Self::Speed => Self::Size,
            Self::Size => Self::Level,
            Self::Level => Self::About,
            Self::About | Self::Quit => Self::Quit,
        }
    }

    /// Returns the item below this one, wrapping from the last item back to the first.
    ///
    /// This is the order in which the highlight moves on its own.
    pub(crate) const fn wrapping_next(self) -> Self {
        match self {
            Self::Quit => Self::Start,
            other => other.next(),
        }
    }

    /// Returns the item above this one, staying on the first item.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::Start | Self::Speed => Self::Start,
            Self::Size => Self::Speed,
            Self::Level => Self::Size,
            Self::About => Self::Level,
            Self::Quit => Self::About,
        }
    }
}

/// How quickly the player's facing rotates while in a maze.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PlayerSpeed {
    /// One quarter turn per second.
    Low,
    /// Two quarter turns per second.
    #[default]
    Medium,
    /// Four quarter turns per second.
    High,
}

impl PlayerSpeed {
    /// Returns the number of quarter turns per second.
    #[must_use]
    pub const fn rotations_per_second(self) -> u32 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 4,
        }
    }

    /// Returns the time between two quarter turns.
    #[must_use]
    pub const fn rotation_interval(self) -> Duration {
        Duration::from_millis(1000 / self.rotations_per_second() as u64)
    }

    /// Returns the next speed, wrapping from the fastest back to the slowest.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }
}

impl fmt::Display for PlayerSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        })
    }
}

/// Preset dimensions for generated mazes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MazeSize {
    /// 3x3 cells.
    Small,
    /// 10x10 cells.
    #[default]
    Medium,
    /// 20x20 cells.
    Big,
}

impl MazeSize {
    /// Returns `(width, height)` in cells.
    #[must_use]
    pub const fn dimensions(self) -> (usize, usize) {
        match self {
            Self::Small => (3, 3),
            Self::Medium => (10, 10),
            Self::Big => (20, 20),
        }
    }

    /// Returns the next size, wrapping from the biggest back to the smallest.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Small => Self::Medium,
            Self::Medium => Self::Big,
            Self::Big => Self::Small,
        }
    }
}

impl fmt::Display for MazeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Big => "Big",
        })
    }
}
