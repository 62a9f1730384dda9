//! Level data and management module.
//!
//! This module contains the `Level` struct, pairing a decoded maze with the name it is listed under,
//! and the built-in default level that is always available.

use std::{ffi::OsString, sync::LazyLock};

use color_eyre::eyre::{OptionExt as _, Result, WrapErr as _};

use crate::{codec, direction::Position, maze::Maze};

/// File extension of level files, without the leading dot.
pub(crate) const LEVEL_EXTENSION: &str = "maze";

/// A named, hand-made maze.
///
/// Levels are written in the same ASCII art format produced by [`codec::encode`], either embedded
/// in the binary or read from `.maze` files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Level {
    /// Display name, taken from the file name without its extension.
    pub name: String,
    /// The decoded maze.
    pub maze: Maze,
    /// Cell the player starts on. Levels always start in the top-left corner.
    pub start: Position,
}

impl Default for Level {
    fn default() -> Self {
        Self::from_source("Default.maze".into(), *DEFAULT_LEVEL)
            .expect("failed to decode the built-in level")
    }
}

impl Level {
    /// Builds a level from a file name and the maze text it contains.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - The `OsString` cannot be converted to a string slice
    /// - The file name doesn't end in the `.maze` extension
    /// - The text is not a valid maze
    pub(crate) fn from_source(file_name: OsString, text: &str) -> Result<Self> {
        let file_name = file_name
            .to_str()
            .ok_or_eyre("failed to convert osstring to string slice")?;
        let name = file_name
            .strip_suffix(LEVEL_EXTENSION)
            .and_then(|stem| stem.strip_suffix('.'))
            .filter(|stem| !stem.is_empty())
            .ok_or_eyre("failed to find extension in file name")?;

        let maze = codec::decode(text).wrap_err_with(|| format!("level {name} is malformed"))?;

        Ok(Self {
            name: name.to_owned(),
            maze,
            start: Position::new(0, 0),
        })
    }
}

/// Built-in level, always listed first.
static DEFAULT_LEVEL: LazyLock<&str> = LazyLock::new(|| {
    "\
+--+--+--+
|  |  |  \x20
+  +--+  +
|        |
+  +  +--+
|  |     |
+--+--+--+"
});
