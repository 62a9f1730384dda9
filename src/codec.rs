//! ASCII art encoding and decoding of mazes.
//!
//! Every cell takes a 3x2 block of characters and shares its border glyphs with its neighbours:
//!
//! ```text
//! +--+--+
//! |     |
//! +--+  +
//! |  |  |
//! +--+--+
//! ```
//!
//! `+` marks corners, `--` a horizontal wall and `|` a vertical one. An opening is the absence of
//! the glyph, a space. The format is also used as an inline level definition language, so
//! [`decode`] rejects malformed input instead of guessing.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::{direction::Direction, maze::Maze};

/// Reasons a maze text can fail to decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Fewer than the three lines a 1x1 maze needs.
    #[error("invalid maze string: too few lines")]
    TooFewLines,
    /// The first line is too short to hold a single cell.
    #[error("invalid maze dimensions: width={width}, height={height}")]
    InvalidDimensions {
        /// Width derived from the first line.
        width: usize,
        /// Height derived from the line count.
        height: usize,
    },
    /// A line does not match the width implied by the first line.
    #[error("invalid line length at row {row}")]
    InvalidLineLength {
        /// Zero-based index of the offending line.
        row: usize,
    },
}

/// Writes the ASCII art form of `maze`, one `\n`-terminated line per text row.
///
/// The top border carries the North walls of the first row and the leading character of each
/// content line carries the West wall of the first column, so a maze opened on any side survives
/// a round trip through [`decode`]. When every North and West boundary wall stands, the output is
/// the plain format: `W` repetitions of `+--` on top and a leading `|` on every content line.
#[must_use]
pub fn encode(maze: &Maze) -> String {
    let width = maze.width();
    let mut out = String::with_capacity((width * 3 + 2) * (maze.height() * 2 + 1));

    for (x, _) in columns(maze) {
        out.push('+');
        out.push_str(horizontal(maze.has_wall(x, 0, Direction::North)));
    }
    out.push_str("+\n");

    for y in rows(maze) {
        out.push(if maze.has_wall(0, y, Direction::West) {
            '|'
        } else {
            ' '
        });
        for (x, _) in columns(maze) {
            out.push_str("  ");
            out.push(if maze.has_wall(x, y, Direction::East) {
                '|'
            } else {
                ' '
            });
        }
        out.push('\n');

        for (x, _) in columns(maze) {
            out.push('+');
            out.push_str(horizontal(maze.has_wall(x, y, Direction::South)));
        }
        out.push_str("+\n");
    }

    out
}

/// Parses the ASCII art form back into a [`Maze`].
///
/// Surrounding whitespace is ignored and a trailing `\r` on each line is dropped. The maze starts
/// fully walled and only ever has walls removed, wherever the text shows a space in place of a
/// wall glyph.
///
/// # Errors
///
/// - [`ParseError::TooFewLines`] if fewer than three lines remain after trimming.
/// - [`ParseError::InvalidDimensions`] if the derived width or height is zero.
/// - [`ParseError::InvalidLineLength`] if a line used by the maze is not `width * 3 + 1` bytes.
pub fn decode(text: &str) -> Result<Maze, ParseError> {
    let lines: Vec<&[u8]> = text
        .trim()
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).as_bytes())
        .collect();

    let [top, ..] = lines.as_slice() else {
        return Err(ParseError::TooFewLines);
    };
    if lines.len() < 3 {
        return Err(ParseError::TooFewLines);
    }

    let width = top.len().saturating_sub(1) / 3;
    let height = (lines.len() - 1) / 2;
    if width < 1 || height < 1 {
        return Err(ParseError::InvalidDimensions { width, height });
    }
    debug!(width, height, "decoding maze");

    let mut maze = Maze::new(width, height);
    let top = line_at(&lines, 0, width)?;

    for (row, y) in rows(&maze).enumerate() {
        let content = line_at(&lines, row * 2 + 1, width)?;
        let walls = line_at(&lines, row * 2 + 2, width)?;

        if content.first() != Some(&b'|') {
            maze.remove_wall(0, y, Direction::West);
        }

        for (x, col) in columns(&maze) {
            if content.get(col * 3 + 3) == Some(&b' ') {
                maze.remove_wall(x, y, Direction::East);
            }
            if is_open(walls, col) {
                maze.remove_wall(x, y, Direction::South);
            }
            if row == 0 && is_open(top, col) {
                maze.remove_wall(x, y, Direction::North);
            }
        }
    }

    Ok(maze)
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self))
    }
}

/// Glyphs for a horizontal wall segment.
const fn horizontal(wall: bool) -> &'static str {
    if wall {
        "--"
    } else {
        "  "
    }
}

/// Fetches line `row`, checking that it is exactly as long as a `width`-cell maze line.
fn line_at<'text>(
    lines: &[&'text [u8]],
    row: usize,
    width: usize,
) -> Result<&'text [u8], ParseError> {
    lines
        .get(row)
        .copied()
        .filter(|line| line.len() == width * 3 + 1)
        .ok_or(ParseError::InvalidLineLength { row })
}

/// Returns whether the horizontal segment of column `col` in a wall line is blank.
fn is_open(line: &[u8], col: usize) -> bool {
    line.get(col * 3 + 1..col * 3 + 3) == Some(b"  ".as_slice())
}

/// Signed row coordinates of `maze`.
fn rows(maze: &Maze) -> impl Iterator<Item = isize> {
    (0..maze.height()).filter_map(|row| isize::try_from(row).ok())
}

/// Signed column coordinates of `maze` paired with their storage index.
fn columns(maze: &Maze) -> impl Iterator<Item = (isize, usize)> {
    (0..maze.width()).filter_map(|col| Some((isize::try_from(col).ok()?, col)))
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;
    use crate::generator;

    /// Asserts that two mazes agree on every wall of every cell.
    fn assert_same_walls(left: &Maze, right: &Maze) {
        assert_eq!(left.width(), right.width());
        assert_eq!(left.height(), right.height());
        for pos in left.positions() {
            for direction in Direction::ALL {
                assert_eq!(
                    left.has_wall(pos.x, pos.y, direction),
                    right.has_wall(pos.x, pos.y, direction),
                    "wall {direction} of {pos} differs"
                );
            }
        }
    }

    #[test]
    fn test_encode_fully_walled_maze() {
        let maze = Maze::new(3, 3);

        assert_eq!(
            encode(&maze),
            "+--+--+--+\n|  |  |  |\n+--+--+--+\n|  |  |  |\n+--+--+--+\n|  |  |  |\n+--+--+--+\n"
        );
    }

    #[test]
    fn test_encode_with_some_walls_removed() {
        let mut maze = Maze::new(2, 2);
        maze.remove_wall(0, 0, Direction::East);
        maze.remove_wall(0, 1, Direction::South);
        maze.remove_wall(1, 0, Direction::South);
        maze.remove_wall(1, 1, Direction::East);

        assert_eq!(
            encode(&maze),
            "+--+--+\n|     |\n+--+  +\n|  |   \n+  +--+\n"
        );
    }

    #[test]
    fn test_encode_open_north_and_west_boundary() {
        let mut maze = Maze::new(2, 1);
        maze.remove_wall(1, 0, Direction::North);
        maze.remove_wall(0, 0, Direction::West);

        assert_eq!(encode(&maze), "+--+  +\n   |  |\n+--+--+\n");
    }

    #[test]
    fn test_encode_walled_north_and_west_is_plain_format() {
        let mut maze = Maze::new(3, 2);
        maze.remove_wall(0, 0, Direction::East);
        maze.remove_wall(1, 0, Direction::South);
        maze.remove_wall(2, 1, Direction::East);

        let text = encode(&maze);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("+--+--+--+"));
        for (idx, line) in lines.enumerate() {
            let expected = if idx % 2 == 0 { '|' } else { '+' };
            assert_eq!(line.chars().next(), Some(expected), "line {line:?}");
        }
    }

    #[test]
    fn test_display_matches_encode() {
        let mut maze = Maze::new(3, 2);
        maze.remove_wall(1, 1, Direction::West);

        assert_eq!(maze.to_string(), encode(&maze));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let generated = generator::generate(8, 5, &mut StdRng::seed_from_u64(3));

        assert_eq!(encode(&generated.maze), encode(&generated.maze));
    }

    #[test]
    fn test_decode_scenario_b() {
        let maze = decode("+--+--+\n|     |\n+--+  +\n|  |   \n+  +--+\n")
            .expect("scenario should decode");

        assert_eq!((maze.width(), maze.height()), (2, 2));
        assert!(!maze.has_wall(0, 0, Direction::East));
        assert!(!maze.has_wall(1, 0, Direction::South));
        assert!(!maze.has_wall(1, 1, Direction::East));
        assert!(!maze.has_wall(0, 1, Direction::South));
        assert!(maze.has_wall(0, 0, Direction::South));
        assert!(maze.has_wall(0, 1, Direction::East));
        assert!(maze.has_wall(0, 0, Direction::North));
        assert!(maze.has_wall(0, 0, Direction::West));
    }

    #[test]
    fn test_decode_reads_north_and_west_openings() {
        let maze = decode("+--+  +\n   |  |\n+--+--+\n").expect("maze should decode");

        assert!(!maze.has_wall(1, 0, Direction::North));
        assert!(!maze.has_wall(0, 0, Direction::West));
        assert!(maze.has_wall(0, 0, Direction::North));
    }

    #[test]
    fn test_decode_accepts_crlf_and_surrounding_whitespace() {
        let maze = decode("\n\n+--+--+\r\n|     |\r\n+--+--+\r\n\n").expect("maze should decode");

        assert_eq!((maze.width(), maze.height()), (2, 1));
        assert!(!maze.has_wall(0, 0, Direction::East));
    }

    #[test]
    fn test_decode_empty_input() {
        assert_eq!(decode(""), Err(ParseError::TooFewLines));
        assert_eq!(decode("   \n  "), Err(ParseError::TooFewLines));
    }

    #[test]
    fn test_decode_bad_line_length() {
        assert_eq!(
            decode("+--+\n|  |  |\n+--+"),
            Err(ParseError::InvalidLineLength { row: 1 })
        );
        assert_eq!(
            decode("+--+--+\n|  |  |\n+--+"),
            Err(ParseError::InvalidLineLength { row: 2 })
        );
    }

    #[test]
    fn test_decode_missing_bottom_border() {
        assert_eq!(decode("+--+\n|  |\n"), Err(ParseError::TooFewLines));
    }

    #[test]
    fn test_decode_first_line_too_short() {
        assert_eq!(
            decode("+-\n|\n+-"),
            Err(ParseError::InvalidDimensions {
                width: 0,
                height: 1
            })
        );
    }

    #[test]
    fn test_decode_checks_top_border_length() {
        assert_eq!(
            decode("+--+-\n|  |\n+--+"),
            Err(ParseError::InvalidLineLength { row: 0 })
        );
    }

    #[test]
    fn test_round_trip_hand_built_maze() {
        let mut maze = Maze::new(4, 3);
        maze.remove_wall(0, 0, Direction::East);
        maze.remove_wall(1, 0, Direction::South);
        maze.remove_wall(1, 1, Direction::East);
        maze.remove_wall(2, 1, Direction::South);
        maze.remove_wall(3, 2, Direction::East);
        maze.remove_wall(0, 2, Direction::West);

        let text = encode(&maze);
        let decoded = decode(&text).expect("encoded maze should decode");

        assert_same_walls(&maze, &decoded);
        assert_eq!(encode(&decoded), text);
    }

    #[test]
    fn test_round_trip_generated_mazes() {
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let generated = generator::generate(7, 4, &mut rng);

            let text = encode(&generated.maze);
            let decoded = decode(&text).expect("generated maze should decode");

            assert_same_walls(&generated.maze, &decoded);
            assert_eq!(encode(&decoded), text, "seed {seed} did not round-trip");
        }
    }

    #[test]
    fn test_round_trip_single_cell() {
        let mut maze = Maze::new(1, 1);
        maze.remove_wall(0, 0, Direction::South);

        let decoded = decode(&encode(&maze)).expect("1x1 maze should decode");

        assert_same_walls(&maze, &decoded);
    }
}
