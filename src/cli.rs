//! Command line interface of the `mazeforge` binary.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr as _};
use rand::{rngs::StdRng, SeedableRng as _};
use tracing::info;

use crate::{
    app::App,
    codec, file_loader, generator,
    logging::StderrMute,
    maze::Maze,
    types::{MazeSize, PlayerSpeed},
};

/// Perfect maze generator and one-button maze game.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log filter directives, e.g. `info` or `mazeforge=debug`
    #[arg(long, global = true, env = "MAZEFORGE_LOG", default_value = "warn")]
    pub log: String,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true, env = "MAZEFORGE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Command to execute, `play` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands of the binary.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Play the game in the terminal
    Play(PlayArgs),
    /// Print a newly generated maze to stdout
    Generate(GenerateArgs),
    /// Decode a maze file and describe its structure
    Check(CheckArgs),
}

/// Options of the `play` command.
#[derive(Debug, Default, Args)]
pub struct PlayArgs {
    /// Directory scanned for `.maze` level files [default: current directory]
    #[arg(long)]
    pub levels: Option<PathBuf>,

    /// Seed for the generated mazes
    #[arg(long)]
    pub seed: Option<u64>,

    /// Initial rotation speed of the player
    #[arg(long, value_enum, default_value_t)]
    pub speed: PlayerSpeed,

    /// Initial size of generated mazes
    #[arg(long, value_enum, default_value_t)]
    pub size: MazeSize,
}

/// Options of the `generate` command.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Number of columns
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=200))]
    pub width: u16,

    /// Number of rows
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=200))]
    pub height: u16,

    /// Random seed; the same seed always yields the same maze
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Options of the `check` command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Maze file to inspect
    pub file: PathBuf,
}

impl Cli {
    /// Executes the selected command.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - The level directory or the checked file cannot be read
    /// - The checked file is not a valid maze
    /// - Writing to stdout or drawing to the terminal fails
    pub fn run(self) -> Result<()> {
        match self
            .command
            .unwrap_or_else(|| Command::Play(PlayArgs::default()))
        {
            Command::Play(args) => play(&args),
            Command::Generate(args) => generate(&args, &mut io::stdout().lock()),
            Command::Check(args) => check(&args, &mut io::stdout().lock()),
        }
    }
}

/// Returns a generator seeded with `seed`, or from the operating system when there is none.
fn seeded_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

/// Runs the terminal game until the player quits.
///
/// Logging to stderr is muted while the game is on screen; use `--log-file` to keep those events.
fn play(args: &PlayArgs) -> Result<()> {
    let dir = args.levels.as_deref().unwrap_or_else(|| Path::new("."));
    let mut levels = Vec::new();
    let loaded = file_loader::fetch_levels(dir, &mut levels)?;
    info!(loaded, dir = %dir.display(), "level files scanned");

    let mut app = App::new(args.speed, args.size, levels, seeded_rng(args.seed));

    let mute = StderrMute::engage();
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    drop(mute);

    result
}

/// Writes a generated maze to `out`.
fn generate(args: &GenerateArgs, out: &mut impl Write) -> Result<()> {
    let generated = generator::generate(
        usize::from(args.width),
        usize::from(args.height),
        &mut seeded_rng(args.seed),
    );

    out.write_all(codec::encode(&generated.maze).as_bytes())
        .wrap_err("failed to write maze")?;
    info!(
        start = %generated.start,
        exit = %generated.exit.position,
        side = %generated.exit.direction,
        "maze generated"
    );

    Ok(())
}

/// Decodes the file named in `args` and writes its description to `out`.
fn check(args: &CheckArgs, out: &mut impl Write) -> Result<()> {
    let path = &args.file;
    let text =
        fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))?;
    let maze = codec::decode(&text)
        .wrap_err_with(|| format!("{} is not a valid maze", path.display()))?;

    describe(&maze, out).wrap_err("failed to write report")?;
    info!(path = %path.display(), "maze checked");

    Ok(())
}

/// Writes the dimensions, passage count and exits of `maze`.
fn describe(maze: &Maze, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "dimensions: {}x{}", maze.width(), maze.height())?;
    writeln!(out, "open edges: {}", maze.open_edges())?;

    let openings = maze.boundary_openings();
    writeln!(out, "boundary openings: {}", openings.len())?;
    for (position, direction) in openings {
        writeln!(out, "  {position} {direction}")?;
    }

    let perfect = if maze.is_perfect() { "yes" } else { "no" };
    writeln!(out, "perfect: {perfect}")
}
