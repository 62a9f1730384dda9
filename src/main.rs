//! This crate contains the source code for the `mazeforge` binary.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use mazeforge::{cli::Cli, init_logging};

fn main() -> Result<()> {
    install()?;

    let cli = Cli::parse();
    init_logging(&cli.log, cli.log_file.as_deref())?;

    cli.run()
}
