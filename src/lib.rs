//! Perfect maze generation, a text format for mazes, and a one-button terminal maze game.
//!
//! The core is made of [`maze`], [`codec`] and [`generator`]. It does no I/O and can be used on
//! its own:
//!
//! ```
//! use mazeforge::{codec, generator};
//!
//! let generated = generator::generate_seeded(4, 3, 7);
//! let text = codec::encode(&generated.maze);
//! assert_eq!(codec::decode(&text), Ok(generated.maze));
//! ```
//!
//! The remaining modules make up the terminal front end started through [`cli::Cli`].

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

pub mod cli;
pub mod codec;
pub mod direction;
pub mod generator;
pub mod maze;

mod app;
mod events;
mod file_loader;
mod level;
mod logging;
mod session;
mod types;
mod ui;

pub use app::App;
pub use logging::init_logging;
pub use types::{MazeSize, PlayerSpeed};
