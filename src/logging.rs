//! Diagnostic output setup.
//!
//! Logs go to a file when one is given and to stderr otherwise. The terminal game draws on the
//! same terminal stderr points at, so stderr output is muted while a [`StderrMute`] is alive.

use std::{
    fs::File,
    io::{self, Write},
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use color_eyre::eyre::{eyre, Result, WrapErr as _};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, EnvFilter};

/// Set while the terminal UI owns the screen.
static STDERR_MUTED: AtomicBool = AtomicBool::new(false);

/// Installs a global subscriber printing events accepted by `filter`.
///
/// `filter` uses the `RUST_LOG` directive syntax, e.g. `warn` or `mazeforge::generator=debug`.
/// Events are appended to `log_file` when given, without colours. Otherwise they go to stderr,
/// keeping stdout for command output.
///
/// # Errors
///
/// This function may return errors if:
/// - The filter does not parse
/// - The log file cannot be opened for appending
/// - A global subscriber is already installed
pub fn init_logging(filter: &str, log_file: Option<&Path>) -> Result<()> {
    let filter =
        EnvFilter::try_new(filter).wrap_err_with(|| format!("invalid log filter `{filter}`"))?;

    let writer = match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(stderr_writer),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(log_file.is_none())
        .with_target(false)
        .try_init()
        .map_err(|err| eyre!(err))
}

/// Returns stderr, or a sink while the terminal UI is on screen.
fn stderr_writer() -> Box<dyn Write> {
    if STDERR_MUTED.load(Ordering::Relaxed) {
        Box::new(io::sink())
    } else {
        Box::new(io::stderr())
    }
}

/// Keeps log lines from being written over the terminal UI until dropped.
///
/// Has no effect on logs written to a file.
#[derive(Debug)]
pub(crate) struct StderrMute(());

impl StderrMute {
    /// Mutes stderr logging.
    pub(crate) fn engage() -> Self {
        STDERR_MUTED.store(true, Ordering::Relaxed);
        Self(())
    }
}

impl Drop for StderrMute {
    fn drop(&mut self) {
        STDERR_MUTED.store(false, Ordering::Relaxed);
    }
}
